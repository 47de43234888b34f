//! Intl provider

use crate::{Markup, Node, Result, render};
use armature_intl::{ErrorHandler, IntlConfig, IntlContext};
use std::sync::Arc;
use tracing::debug;

/// Owns a formatting context and scopes it to a subtree.
///
/// # Example
///
/// ```
/// use armature_formatted::{FormattedNumber, IntlProvider};
/// use armature_intl::IntlConfig;
///
/// let provider = IntlProvider::new(IntlConfig::new("en").with_text_component("span")).unwrap();
/// let markup = provider.render([FormattedNumber::new(1234.5).into()]).unwrap();
///
/// assert_eq!(markup.to_html(), "<span>1,234.5</span>");
/// ```
#[derive(Debug, Clone)]
pub struct IntlProvider {
    context: Arc<IntlContext>,
}

impl IntlProvider {
    /// Build a provider, resolving the configuration.
    pub fn new(config: IntlConfig) -> Result<Self> {
        Ok(Self::from_context(Arc::new(IntlContext::new(config)?)))
    }

    /// Build a provider with a custom formatting error handler.
    pub fn with_error_handler(config: IntlConfig, on_error: ErrorHandler) -> Result<Self> {
        Ok(Self::from_context(Arc::new(IntlContext::with_error_handler(
            config, on_error,
        )?)))
    }

    /// Share an existing context.
    pub fn from_context(context: Arc<IntlContext>) -> Self {
        debug!(
            locale = %context.locale(),
            time_zone = context.time_zone().unwrap_or("UTC"),
            "Intl provider created"
        );
        Self { context }
    }

    pub fn context(&self) -> &Arc<IntlContext> {
        &self.context
    }

    /// A provider node around `children`.
    pub fn wrap(&self, children: impl IntoIterator<Item = Node>) -> Node {
        Node::provider(Arc::clone(&self.context), children)
    }

    /// Render `children` under this provider.
    pub fn render(&self, children: impl IntoIterator<Item = Node>) -> Result<Markup> {
        render(&self.wrap(children))
    }
}
