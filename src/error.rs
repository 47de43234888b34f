//! Error types for formatted components

use armature_intl::IntlError;
use thiserror::Error;

/// Errors raised while rendering a component tree.
#[derive(Debug, Error)]
pub enum FormattedError {
    /// A component rendered outside of any `IntlProvider`
    #[error(
        "[Armature Intl] Could not find required intl context for <{component}>. \
         Wrap the tree in an IntlProvider."
    )]
    MissingIntlContext { component: String },

    /// Parts mode was requested without a parts render function
    #[error(
        "[Armature Intl] <{component}> with should_format_to_parts requires a render \
         function accepting the formatted parts"
    )]
    RenderFnRequired { component: String },

    /// Formatting error from the intl context
    #[error(transparent)]
    Intl(#[from] IntlError),
}

impl FormattedError {
    pub fn missing_context(component: impl Into<String>) -> Self {
        Self::MissingIntlContext {
            component: component.into(),
        }
    }
}
