//! Formatter options
//!
//! Option bags for the date/time and number formatters. Field names and
//! value tokens follow the `Intl` conventions (`"2-digit"`, `"long"`,
//! `"exceptZero"`, ...) so option sets can be shared with configuration
//! files written in JSON or TOML.

use serde::{Deserialize, Serialize};

/// Style for purely numeric fields (year, day, hour, minute, second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericStyle {
    /// e.g. "6"
    #[serde(rename = "numeric")]
    Numeric,
    /// e.g. "06"
    #[serde(rename = "2-digit")]
    TwoDigit,
}

/// Style for the month field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthStyle {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "narrow")]
    Narrow,
}

impl MonthStyle {
    /// Whether the month is rendered as a name rather than a number.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Long | Self::Short | Self::Narrow)
    }
}

/// Style for named fields (weekday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    Long,
    Short,
    Narrow,
}

/// How a time zone is named in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeZoneNameStyle {
    /// "UTC" for the UTC zone, otherwise a short GMT offset ("GMT+9")
    Short,
    /// Short GMT offset ("GMT+9", "GMT+5:30")
    ShortOffset,
    /// Long GMT offset ("GMT+09:00")
    LongOffset,
}

/// Options for date and time formatting.
///
/// # Example
///
/// ```
/// use armature_intl::{DateTimeFormatOptions, MonthStyle, NumericStyle};
///
/// let options = DateTimeFormatOptions::new()
///     .year(NumericStyle::Numeric)
///     .month(MonthStyle::Long)
///     .day(NumericStyle::TwoDigit);
/// assert!(options.has_date_fields());
/// assert!(!options.has_time_fields());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateTimeFormatOptions {
    /// Name of a custom format from the context configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<NumericStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<NumericStyle>,
    /// Force a 12-hour (`true`) or 24-hour (`false`) clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    /// IANA time zone overriding the context time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_name: Option<TimeZoneNameStyle>,
}

impl DateTimeFormatOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a named custom format.
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format = Some(name.into());
        self
    }

    pub fn weekday(mut self, style: TextStyle) -> Self {
        self.weekday = Some(style);
        self
    }

    pub fn year(mut self, style: NumericStyle) -> Self {
        self.year = Some(style);
        self
    }

    pub fn month(mut self, style: MonthStyle) -> Self {
        self.month = Some(style);
        self
    }

    pub fn day(mut self, style: NumericStyle) -> Self {
        self.day = Some(style);
        self
    }

    pub fn hour(mut self, style: NumericStyle) -> Self {
        self.hour = Some(style);
        self
    }

    pub fn minute(mut self, style: NumericStyle) -> Self {
        self.minute = Some(style);
        self
    }

    pub fn second(mut self, style: NumericStyle) -> Self {
        self.second = Some(style);
        self
    }

    pub fn hour12(mut self, hour12: bool) -> Self {
        self.hour12 = Some(hour12);
        self
    }

    pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    pub fn time_zone_name(mut self, style: TimeZoneNameStyle) -> Self {
        self.time_zone_name = Some(style);
        self
    }

    /// Whether any of weekday/year/month/day is requested.
    pub fn has_date_fields(&self) -> bool {
        self.weekday.is_some() || self.year.is_some() || self.month.is_some() || self.day.is_some()
    }

    /// Whether any of hour/minute/second is requested.
    pub fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }

    /// Overlay `self` on top of `base`: fields set here win.
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            format: None,
            weekday: self.weekday.or(base.weekday),
            year: self.year.or(base.year),
            month: self.month.or(base.month),
            day: self.day.or(base.day),
            hour: self.hour.or(base.hour),
            minute: self.minute.or(base.minute),
            second: self.second.or(base.second),
            hour12: self.hour12.or(base.hour12),
            time_zone: self.time_zone.clone().or_else(|| base.time_zone.clone()),
            time_zone_name: self.time_zone_name.or(base.time_zone_name),
        }
    }
}

/// Number formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStyle {
    #[default]
    Decimal,
    Percent,
    Currency,
}

/// How the currency is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyDisplay {
    /// Locale-aware symbol ("$", "CA$", "€")
    #[default]
    Symbol,
    /// Bare symbol without disambiguating prefix ("$" for CAD)
    NarrowSymbol,
    /// ISO 4217 code ("USD")
    Code,
}

/// Number notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    #[default]
    Standard,
    /// Short compact notation ("1.2K")
    Compact,
}

/// When to show the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignDisplay {
    /// Negative numbers only
    #[default]
    Auto,
    /// Always, including zero
    Always,
    /// Never
    Never,
    /// Positive and negative numbers, not zero
    ExceptZero,
}

/// Options for number formatting.
///
/// # Example
///
/// ```
/// use armature_intl::{NumberFormatOptions, NumberStyle};
///
/// let options = NumberFormatOptions::new()
///     .style(NumberStyle::Currency)
///     .currency("EUR")
///     .maximum_fraction_digits(0);
/// assert_eq!(options.currency.as_deref(), Some("EUR"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberFormatOptions {
    /// Name of a custom format from the context configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NumberStyle>,
    /// ISO 4217 currency code, required with the currency style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_display: Option<CurrencyDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_grouping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_integer_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_fraction_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_fraction_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<Notation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_display: Option<SignDisplay>,
}

impl NumberFormatOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a named custom format.
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format = Some(name.into());
        self
    }

    pub fn style(mut self, style: NumberStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = Some(code.into());
        self
    }

    pub fn currency_display(mut self, display: CurrencyDisplay) -> Self {
        self.currency_display = Some(display);
        self
    }

    pub fn use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = Some(use_grouping);
        self
    }

    pub fn minimum_integer_digits(mut self, digits: usize) -> Self {
        self.minimum_integer_digits = Some(digits);
        self
    }

    pub fn minimum_fraction_digits(mut self, digits: usize) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    pub fn maximum_fraction_digits(mut self, digits: usize) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    pub fn notation(mut self, notation: Notation) -> Self {
        self.notation = Some(notation);
        self
    }

    pub fn sign_display(mut self, sign_display: SignDisplay) -> Self {
        self.sign_display = Some(sign_display);
        self
    }

    /// Overlay `self` on top of `base`: fields set here win.
    pub fn merged_over(&self, base: &Self) -> Self {
        Self {
            format: None,
            style: self.style.or(base.style),
            currency: self.currency.clone().or_else(|| base.currency.clone()),
            currency_display: self.currency_display.or(base.currency_display),
            use_grouping: self.use_grouping.or(base.use_grouping),
            minimum_integer_digits: self.minimum_integer_digits.or(base.minimum_integer_digits),
            minimum_fraction_digits: self
                .minimum_fraction_digits
                .or(base.minimum_fraction_digits),
            maximum_fraction_digits: self
                .maximum_fraction_digits
                .or(base.maximum_fraction_digits),
            notation: self.notation.or(base.notation),
            sign_display: self.sign_display.or(base.sign_display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_options_from_intl_json() {
        let json = r#"{"year": "numeric", "month": "long", "day": "2-digit", "timeZoneName": "short"}"#;
        let options: DateTimeFormatOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.year, Some(NumericStyle::Numeric));
        assert_eq!(options.month, Some(MonthStyle::Long));
        assert_eq!(options.day, Some(NumericStyle::TwoDigit));
        assert_eq!(options.time_zone_name, Some(TimeZoneNameStyle::Short));
        assert!(options.hour.is_none());
    }

    #[test]
    fn test_number_options_from_intl_json() {
        let json = r#"{"style": "currency", "currency": "USD", "signDisplay": "exceptZero"}"#;
        let options: NumberFormatOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.style, Some(NumberStyle::Currency));
        assert_eq!(options.sign_display, Some(SignDisplay::ExceptZero));
    }

    #[test]
    fn test_date_merge_prefers_explicit() {
        let base = DateTimeFormatOptions::new()
            .month(MonthStyle::Short)
            .day(NumericStyle::Numeric)
            .time_zone("UTC");
        let explicit = DateTimeFormatOptions::new()
            .format("short")
            .month(MonthStyle::Long);

        let merged = explicit.merged_over(&base);
        assert_eq!(merged.month, Some(MonthStyle::Long));
        assert_eq!(merged.day, Some(NumericStyle::Numeric));
        assert_eq!(merged.time_zone.as_deref(), Some("UTC"));
        assert!(merged.format.is_none());
    }

    #[test]
    fn test_number_merge_prefers_explicit() {
        let base = NumberFormatOptions::new()
            .style(NumberStyle::Currency)
            .currency("EUR");
        let explicit = NumberFormatOptions::new().currency("USD");

        let merged = explicit.merged_over(&base);
        assert_eq!(merged.style, Some(NumberStyle::Currency));
        assert_eq!(merged.currency.as_deref(), Some("USD"));
    }
}
