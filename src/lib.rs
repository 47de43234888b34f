// Armature Formatted - locale-aware value components for declarative view trees
//
// FormattedDate, FormattedTime and FormattedNumber render a value through the
// intl context of the nearest IntlProvider, either as text or through a
// caller-supplied render function over typed parts.

//! # Quick Start
//!
//! ```
//! use armature_formatted::prelude::*;
//!
//! let provider = IntlProvider::new(
//!     IntlConfig::new("en")
//!         .with_time_zone("Asia/Tokyo")
//!         .with_text_component("span"),
//! )
//! .unwrap();
//!
//! let tree = [
//!     FormattedDate::new(1459832991883_i64).into(),
//!     Node::text(" "),
//!     FormattedTime::new(1459832991883_i64).into(),
//! ];
//!
//! assert_eq!(
//!     provider.render(tree).unwrap().to_html(),
//!     "<span>4/5/2016</span> <span>2:09\u{202f}PM</span>"
//! );
//! ```
//!
//! Rendering a component outside of a provider fails:
//!
//! ```
//! use armature_formatted::{FormattedError, FormattedNumber, Node, render};
//!
//! let err = render(&FormattedNumber::new(1.0).into()).unwrap_err();
//! assert!(matches!(err, FormattedError::MissingIntlContext { .. }));
//! ```

mod component;
mod error;
mod formatted;
mod node;
mod provider;
mod render;

pub use component::{Component, FnComponent};
pub use error::FormattedError;
pub use formatted::{
    AnyFormatted, DateKind, FormatKind, FormatOptions, FormatRequest, Formatted, FormattedDate,
    FormattedNumber, FormattedTime, FormatterKind, NumberKind, PartsRenderFn, RawValue,
    StringRenderFn, TimeKind, create_formatted_component,
};
pub use node::{Markup, Node};
pub use provider::IntlProvider;
pub use render::{invariant_intl_context, render, render_with};

// Re-export the formatting engine
pub use armature_intl;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, FormattedError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Component, FormatKind, FormatRequest, FormattedDate, FormattedError, FormattedNumber,
        FormattedTime, IntlProvider, Markup, Node, Result, create_formatted_component, render,
    };
    pub use armature_intl::{
        DateTimeFormatOptions, DateValue, FormatPart, IntlConfig, IntlContext,
        NumberFormatOptions, PartKind,
    };
}
