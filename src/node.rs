//! View tree and rendered output
//!
//! [`Node`] is the declarative tree authors build: text, elements,
//! fragments, components and provider boundaries. Rendering resolves every
//! component and provider and yields [`Markup`], which only holds text and
//! elements.

use crate::Component;
use armature_intl::IntlContext;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A node in a declarative view tree.
#[derive(Clone, Default)]
pub enum Node {
    /// Renders nothing
    #[default]
    Empty,
    /// Plain text, escaped when serialized to HTML
    Text(String),
    /// An element with children
    Element { tag: String, children: Vec<Node> },
    /// Children without a wrapper
    Fragment(Vec<Node>),
    /// A component rendered against the nearest intl context
    Component(Arc<dyn Component>),
    /// A subtree with its own intl context
    Provider {
        context: Arc<IntlContext>,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn element(tag: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            children: children.into_iter().collect(),
        }
    }

    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    pub fn component(component: impl Component + 'static) -> Self {
        Self::Component(Arc::new(component))
    }

    pub fn provider(context: Arc<IntlContext>, children: impl IntoIterator<Item = Node>) -> Self {
        Self::Provider {
            context,
            children: children.into_iter().collect(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Element { tag, children } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("children", children)
                .finish(),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
            Self::Component(component) => f
                .debug_tuple("Component")
                .field(&component.display_name())
                .finish(),
            Self::Provider { context, children } => f
                .debug_struct("Provider")
                .field("locale", context.locale())
                .field("children", children)
                .finish(),
        }
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Rendered output.
///
/// # Example
///
/// ```
/// use armature_formatted::Markup;
///
/// let markup = Markup::Element {
///     tag: "span".to_string(),
///     children: vec![Markup::Text("1 < 2".to_string())],
/// };
/// assert_eq!(markup.to_html(), "<span>1 &lt; 2</span>");
/// assert_eq!(markup.text_content(), "1 < 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    #[default]
    Empty,
    Text(String),
    Element { tag: String, children: Vec<Markup> },
    Fragment(Vec<Markup>),
}

impl Markup {
    /// Serialize to HTML, escaping text content.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text(text) => {
                html_escape::encode_text_to_string(text, out);
            }
            Self::Element { tag, children } => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Self::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }

    /// Concatenated text of every descendant.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } | Self::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_escapes_text() {
        let markup = Markup::Fragment(vec![
            Markup::Element {
                tag: "b".to_string(),
                children: vec![Markup::Text("Tom & Jerry".to_string())],
            },
            Markup::Text("<script>".to_string()),
            Markup::Empty,
        ]);

        assert_eq!(markup.to_html(), "<b>Tom &amp; Jerry</b>&lt;script&gt;");
        assert_eq!(markup.text_content(), "Tom & Jerry<script>");
        assert_eq!(markup.to_string(), markup.to_html());
    }

    #[test]
    fn test_markup_serializes_by_variant() {
        let markup = Markup::Element {
            tag: "span".to_string(),
            children: vec![Markup::Text("1,234.5".to_string())],
        };
        let json = serde_json::to_value(&markup).unwrap();

        assert_eq!(json["element"]["tag"], "span");
        assert_eq!(json["element"]["children"][0]["text"], "1,234.5");
    }

    #[test]
    fn test_node_builders() {
        let node = Node::element("p", ["a".into(), Node::text("b")]);
        match node {
            Node::Element { tag, children } => {
                assert_eq!(tag, "p");
                assert_eq!(children.len(), 2);
            }
            other => panic!("unexpected node: {:?}", other),
        }

        assert!(matches!(Node::default(), Node::Empty));
        assert!(matches!(Node::fragment([]), Node::Fragment(c) if c.is_empty()));
    }
}
