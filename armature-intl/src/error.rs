//! Error types for intl formatting

use thiserror::Error;

/// Errors that can occur while resolving or running a formatter.
#[derive(Debug, Error)]
pub enum IntlError {
    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// No formatting data for the requested locale
    #[error("Missing locale data for locale \"{requested}\", using default locale \"{fallback}\"")]
    MissingLocaleData { requested: String, fallback: String },

    /// No bundled formatting data for the locale
    #[error("No formatting data for locale: {0}")]
    UnsupportedLocale(String),

    /// Unknown IANA time zone identifier
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),

    /// Value cannot be turned into a date
    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    /// Value cannot be formatted as a number
    #[error("Invalid number value: {0}")]
    InvalidNumber(String),

    /// Formatter option out of range or inconsistent
    #[error("Invalid `{option}` option: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },

    /// Named format missing from the configured custom formats
    #[error("No {kind} format named: {name}")]
    UnknownFormat { kind: &'static str, name: String },

    /// Configuration could not be loaded
    #[error("Failed to load configuration: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl IntlError {
    /// Shorthand for an [`IntlError::InvalidOption`].
    pub fn invalid_option(option: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            message: message.into(),
        }
    }
}
