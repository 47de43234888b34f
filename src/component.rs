//! Renderable components

use crate::{Node, Result};
use armature_intl::IntlContext;

/// A unit of a view tree that renders against an intl context.
///
/// The context is passed explicitly; the renderer supplies the nearest
/// provider's context and fails before calling `render` when there is none.
pub trait Component: Send + Sync {
    /// Name used in error messages and logs.
    fn display_name(&self) -> &str;

    fn render(&self, intl: &IntlContext) -> Result<Node>;
}

/// A component backed by a closure.
///
/// # Example
///
/// ```
/// use armature_formatted::{FnComponent, IntlProvider, Node, Result};
/// use armature_intl::{IntlConfig, IntlContext};
///
/// let greeting = FnComponent::new("Greeting", |intl: &IntlContext| -> Result<Node> {
///     Ok(Node::text(format!("locale: {}", intl.locale())))
/// });
///
/// let provider = IntlProvider::new(IntlConfig::new("fr")).unwrap();
/// let markup = provider.render([Node::component(greeting)]).unwrap();
/// assert_eq!(markup.text_content(), "locale: fr");
/// ```
pub struct FnComponent<F> {
    name: String,
    render: F,
}

impl<F> FnComponent<F>
where
    F: Fn(&IntlContext) -> Result<Node> + Send + Sync,
{
    pub fn new(name: impl Into<String>, render: F) -> Self {
        Self {
            name: name.into(),
            render,
        }
    }
}

impl<F> Component for FnComponent<F>
where
    F: Fn(&IntlContext) -> Result<Node> + Send + Sync,
{
    fn display_name(&self) -> &str {
        &self.name
    }

    fn render(&self, intl: &IntlContext) -> Result<Node> {
        (self.render)(intl)
    }
}
