//! Locale identifiers
//!
//! Provides the BCP 47 locale model used to select formatting data.

use crate::{IntlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a locale (language + optional script and region).
///
/// # Examples
///
/// ```
/// use armature_intl::Locale;
///
/// let en_us = Locale::parse("en-US").unwrap();
/// assert_eq!(en_us.language, "en");
/// assert_eq!(en_us.region.as_deref(), Some("US"));
/// assert_eq!(en_us.tag(), "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code (ISO 639-1, e.g., "en", "fr", "de")
    pub language: String,
    /// Optional script (e.g., "Latn", "Hans")
    pub script: Option<String>,
    /// Optional region code (ISO 3166-1, e.g., "US", "GB", "FR")
    pub region: Option<String>,
}

impl Locale {
    /// Create a new locale.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            script: None,
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// Parse from BCP 47 tag (e.g., "en-US", "zh-Hans-CN").
    ///
    /// Underscores are accepted as subtag separators. Unicode extension
    /// subtags (`-u-...`) are ignored.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut subtags = tag.trim().split(['-', '_']);

        let language = subtags.next().unwrap_or_default().to_lowercase();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(IntlError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for subtag in subtags {
            if subtag.len() == 1 {
                // Singleton: everything after is an extension
                break;
            }
            if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                script = Some(title_case(subtag));
            } else if subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(subtag.to_uppercase());
            } else if subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()) {
                region = Some(subtag.to_string());
            } else if subtag.is_empty() {
                return Err(IntlError::InvalidLocale(tag.to_string()));
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// Get the language tag (e.g., "en-US").
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if let Some(ref script) = self.script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(ref region) = self.region {
            tag.push('-');
            tag.push_str(region);
        }
        tag
    }

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = IntlError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = IntlError;

    fn try_from(value: String) -> Result<Self> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}
