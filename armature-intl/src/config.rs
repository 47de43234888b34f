//! Provider configuration
//!
//! An [`IntlConfig`] carries everything a formatting context needs: the
//! active locale, the fallback locale, the default time zone, the text
//! wrapper and named custom formats. It can be built in code or loaded from
//! JSON, TOML or the environment.

use crate::{DateTimeFormatOptions, IntlError, Locale, NumberFormatOptions, Result};
use crate::datetime::parse_time_zone;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "ARMATURE_INTL";

/// Named formats referenced through the `format` option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFormats {
    pub date: HashMap<String, DateTimeFormatOptions>,
    pub time: HashMap<String, DateTimeFormatOptions>,
    pub number: HashMap<String, NumberFormatOptions>,
}

impl CustomFormats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, name: impl Into<String>, options: DateTimeFormatOptions) -> Self {
        self.date.insert(name.into(), options);
        self
    }

    pub fn with_time(mut self, name: impl Into<String>, options: DateTimeFormatOptions) -> Self {
        self.time.insert(name.into(), options);
        self
    }

    pub fn with_number(mut self, name: impl Into<String>, options: NumberFormatOptions) -> Self {
        self.number.insert(name.into(), options);
        self
    }
}

/// Formatting context configuration.
///
/// # Example
///
/// ```
/// use armature_intl::IntlConfig;
///
/// let config = IntlConfig::new("fr-FR")
///     .with_time_zone("Europe/Paris")
///     .with_text_component("span");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntlConfig {
    /// Active locale tag
    pub locale: String,
    /// Locale used when the active one has no formatting data
    pub default_locale: String,
    /// IANA zone used when a formatter does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Element tag wrapping formatted strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_component: Option<String>,
    pub formats: CustomFormats,
}

impl Default for IntlConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            default_locale: "en".to_string(),
            time_zone: None,
            text_component: None,
            formats: CustomFormats::default(),
        }
    }
}

impl IntlConfig {
    /// Configuration for a locale with every other setting at its default.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    pub fn with_text_component(mut self, tag: impl Into<String>) -> Self {
        self.text_component = Some(tag.into());
        self
    }

    pub fn with_formats(mut self, formats: CustomFormats) -> Self {
        self.formats = formats;
        self
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a `.json` or `.toml` file, choosing the parser by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| IntlError::ConfigError("No file extension found".to_string()))?;

        let content = fs::read_to_string(path)?;
        match ext.to_lowercase().as_str() {
            "json" => Self::from_json_str(&content),
            "toml" => Self::from_toml_str(&content),
            other => Err(IntlError::ConfigError(format!("Unsupported format: {}", other))),
        }
    }

    /// Read `ARMATURE_INTL_*` environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup using the `ARMATURE_INTL_*` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(&format!("{}_{}", ENV_PREFIX, name)).filter(|value| !value.trim().is_empty())
        };

        let mut config = Self::default();
        if let Some(locale) = var("LOCALE") {
            config.locale = locale;
        }
        if let Some(locale) = var("DEFAULT_LOCALE") {
            config.default_locale = locale;
        }
        config.time_zone = var("TIME_ZONE");
        config.text_component = var("TEXT_COMPONENT");
        config
    }

    /// Check locale syntax and every time zone identifier.
    pub fn validate(&self) -> Result<()> {
        Locale::parse(&self.locale)?;
        Locale::parse(&self.default_locale)?;

        if let Some(zone) = &self.time_zone {
            parse_time_zone(zone)?;
        }

        for options in self.formats.date.values().chain(self.formats.time.values()) {
            if let Some(zone) = &options.time_zone {
                parse_time_zone(zone)?;
            }
        }

        if let Some(tag) = &self.text_component {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(IntlError::ConfigError(format!(
                    "Invalid text component tag: {:?}",
                    tag
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonthStyle, NumberStyle, NumericStyle};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = IntlConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.default_locale, "en");
        assert!(config.time_zone.is_none());
        assert!(config.text_component.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = IntlConfig::from_json_str(
            r#"{
                "locale": "de-DE",
                "timeZone": "Europe/Berlin",
                "textComponent": "span",
                "formats": {
                    "date": { "short": { "year": "numeric", "month": "short", "day": "2-digit" } },
                    "number": { "eur": { "style": "currency", "currency": "EUR" } }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.locale, "de-DE");
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.time_zone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.text_component.as_deref(), Some("span"));

        let short = &config.formats.date["short"];
        assert_eq!(short.year, Some(NumericStyle::Numeric));
        assert_eq!(short.month, Some(MonthStyle::Short));
        assert_eq!(short.day, Some(NumericStyle::TwoDigit));
        assert_eq!(config.formats.number["eur"].style, Some(NumberStyle::Currency));
    }

    #[test]
    fn test_from_toml() {
        let config = IntlConfig::from_toml_str(
            r#"
                locale = "ja-JP"
                defaultLocale = "en-US"

                [formats.time.hm]
                hour = "2-digit"
                minute = "2-digit"
            "#,
        )
        .unwrap();

        assert_eq!(config.locale, "ja-JP");
        assert_eq!(config.default_locale, "en-US");
        assert_eq!(config.formats.time["hm"].hour, Some(NumericStyle::TwoDigit));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "locale = \"fr\"\ntimeZone = \"Europe/Paris\"").unwrap();

        let config = IntlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.locale, "fr");
        assert_eq!(config.time_zone.as_deref(), Some("Europe/Paris"));

        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            IntlConfig::from_file(file.path()),
            Err(IntlError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("ARMATURE_INTL_LOCALE", "es-ES"),
            ("ARMATURE_INTL_TIME_ZONE", "Europe/Madrid"),
            ("ARMATURE_INTL_TEXT_COMPONENT", ""),
        ]
        .into_iter()
        .collect();

        let config = IntlConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.locale, "es-ES");
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.time_zone.as_deref(), Some("Europe/Madrid"));
        assert!(config.text_component.is_none());
    }

    #[test]
    fn test_validate() {
        assert!(IntlConfig::new("").validate().is_err());
        assert!(IntlConfig::new("en").with_time_zone("Mars/Olympus").validate().is_err());
        assert!(IntlConfig::new("en").with_text_component("<b>").validate().is_err());

        let formats = CustomFormats::new()
            .with_time("bad", DateTimeFormatOptions::new().time_zone("Nowhere/Land"));
        assert!(IntlConfig::new("en").with_formats(formats).validate().is_err());
    }
}
