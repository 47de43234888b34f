//! Tree rendering
//!
//! Walks a [`Node`] tree, threading the nearest provider's context down to
//! every component.

use crate::{FormattedError, Markup, Node, Result};
use armature_intl::IntlContext;
use tracing::trace;

/// Render a tree that carries its own providers.
pub fn render(node: &Node) -> Result<Markup> {
    render_with(node, None)
}

/// Render a tree with an optional ambient context.
///
/// A `Provider` node replaces the ambient context for its subtree. A
/// component reached with no context fails with
/// [`FormattedError::MissingIntlContext`].
pub fn render_with(node: &Node, intl: Option<&IntlContext>) -> Result<Markup> {
    match node {
        Node::Empty => Ok(Markup::Empty),
        Node::Text(text) => Ok(Markup::Text(text.clone())),
        Node::Element { tag, children } => Ok(Markup::Element {
            tag: tag.clone(),
            children: render_children(children, intl)?,
        }),
        Node::Fragment(children) => Ok(Markup::Fragment(render_children(children, intl)?)),
        Node::Provider { context, children } => {
            Ok(Markup::Fragment(render_children(children, Some(context.as_ref()))?))
        }
        Node::Component(component) => {
            let name = component.display_name();
            let intl = invariant_intl_context(intl, name)?;
            trace!(component = name, locale = %intl.locale(), "Rendering component");

            let output = component.render(intl)?;
            render_with(&output, Some(intl))
        }
    }
}

fn render_children(children: &[Node], intl: Option<&IntlContext>) -> Result<Vec<Markup>> {
    children.iter().map(|child| render_with(child, intl)).collect()
}

/// Require a context for `component`.
pub fn invariant_intl_context<'a>(
    intl: Option<&'a IntlContext>,
    component: &str,
) -> Result<&'a IntlContext> {
    intl.ok_or_else(|| FormattedError::missing_context(component))
}
