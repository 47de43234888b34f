//! Formatting context
//!
//! [`IntlContext`] is the resolved, immutable state a provider hands to every
//! descendant: the locale whose data is used, the default time zone, the
//! text wrapper and the named formats. It produces strings and typed parts
//! for dates, times and numbers, and caches the formatters it resolves.

use crate::data;
use crate::{
    DateTimeFormatOptions, DateTimeFormatter, DateTimeMode, DateValue, FormatPart, IntlConfig,
    IntlError, Locale, NumberFormatOptions, NumberFormatter, Result,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Callback receiving every non-fatal formatting error.
pub type ErrorHandler = Arc<dyn Fn(&IntlError) + Send + Sync>;

type DateTimeKey = (DateTimeMode, DateTimeFormatOptions);

/// The handler used when none is supplied: log through `tracing`.
pub fn default_error_handler() -> ErrorHandler {
    Arc::new(|err: &IntlError| {
        error!(error = %err, "Intl formatting error");
    })
}

/// Resolved formatting context.
///
/// String operations never fail. On error they report through the error
/// handler and fall back to the raw value's text. Parts operations return
/// the error instead.
///
/// # Example
///
/// ```
/// use armature_intl::{IntlConfig, IntlContext, NumberFormatOptions};
///
/// let intl = IntlContext::new(IntlConfig::new("de-DE")).unwrap();
/// assert_eq!(intl.format_number(1234.5, &NumberFormatOptions::new()), "1.234,5");
/// ```
pub struct IntlContext {
    config: IntlConfig,
    locale: Locale,
    data_locale: Locale,
    on_error: ErrorHandler,
    date_time_cache: RwLock<HashMap<DateTimeKey, Arc<DateTimeFormatter>>>,
    number_cache: RwLock<HashMap<NumberFormatOptions, Arc<NumberFormatter>>>,
}

impl IntlContext {
    /// Build a context that logs formatting errors.
    pub fn new(config: IntlConfig) -> Result<Self> {
        Self::with_error_handler(config, default_error_handler())
    }

    /// Build a context with a custom error handler.
    ///
    /// A locale without formatting data is not fatal: the handler receives
    /// [`IntlError::MissingLocaleData`] and the default locale's data is
    /// used instead.
    pub fn with_error_handler(config: IntlConfig, on_error: ErrorHandler) -> Result<Self> {
        config.validate()?;

        let locale = Locale::parse(&config.locale)?;
        let data_locale = if data::locale_data(&locale).is_some() {
            locale.clone()
        } else {
            let fallback = Locale::parse(&config.default_locale)?;
            if data::locale_data(&fallback).is_none() {
                return Err(IntlError::UnsupportedLocale(fallback.tag()));
            }

            warn!(
                requested = %locale,
                fallback = %fallback,
                "No formatting data for locale, using default locale"
            );
            on_error(&IntlError::MissingLocaleData {
                requested: locale.tag(),
                fallback: fallback.tag(),
            });
            fallback
        };

        Ok(Self {
            config,
            locale,
            data_locale,
            on_error,
            date_time_cache: RwLock::new(HashMap::new()),
            number_cache: RwLock::new(HashMap::new()),
        })
    }

    /// The configured locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The locale whose data formats values. Differs from
    /// [`locale`](Self::locale) after a fallback.
    pub fn data_locale(&self) -> &Locale {
        &self.data_locale
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.config.time_zone.as_deref()
    }

    /// Element tag wrapping formatted strings, if any.
    pub fn text_component(&self) -> Option<&str> {
        self.config.text_component.as_deref()
    }

    pub fn config(&self) -> &IntlConfig {
        &self.config
    }

    /// Pass an error to the error handler.
    pub fn report(&self, err: &IntlError) {
        (self.on_error)(err);
    }

    /// Resolve (or reuse) a date/time formatter.
    ///
    /// A `format` name is looked up among the custom formats for `mode`
    /// and the explicit options are layered over it. An unknown name is
    /// reported and ignored.
    pub fn date_time_formatter(
        &self,
        mode: DateTimeMode,
        options: &DateTimeFormatOptions,
    ) -> Result<Arc<DateTimeFormatter>> {
        let key = (mode, self.resolve_date_time_options(mode, options));

        if let Some(formatter) = self.date_time_cache.read().get(&key) {
            return Ok(Arc::clone(formatter));
        }

        let formatter = Arc::new(DateTimeFormatter::new(
            &self.data_locale,
            mode,
            &key.1,
            self.time_zone(),
        )?);
        debug!(
            locale = %self.data_locale,
            mode = %mode,
            time_zone = %formatter.time_zone(),
            "Resolved date/time formatter"
        );

        let mut cache = self.date_time_cache.write();
        Ok(Arc::clone(cache.entry(key).or_insert(formatter)))
    }

    /// Resolve (or reuse) a number formatter.
    pub fn number_formatter(&self, options: &NumberFormatOptions) -> Result<Arc<NumberFormatter>> {
        let key = self.resolve_number_options(options);

        if let Some(formatter) = self.number_cache.read().get(&key) {
            return Ok(Arc::clone(formatter));
        }

        let formatter = Arc::new(NumberFormatter::new(&self.data_locale, &key)?);
        debug!(
            locale = %self.data_locale,
            style = ?formatter.style(),
            "Resolved number formatter"
        );

        let mut cache = self.number_cache.write();
        Ok(Arc::clone(cache.entry(key).or_insert(formatter)))
    }

    /// Format the date portion of a value.
    pub fn format_date(
        &self,
        value: impl Into<DateValue>,
        options: &DateTimeFormatOptions,
    ) -> String {
        self.format_date_time(DateTimeMode::Date, value.into(), options)
    }

    /// Format the time portion of a value.
    pub fn format_time(
        &self,
        value: impl Into<DateValue>,
        options: &DateTimeFormatOptions,
    ) -> String {
        self.format_date_time(DateTimeMode::Time, value.into(), options)
    }

    pub fn format_number(&self, value: f64, options: &NumberFormatOptions) -> String {
        match self.number_formatter(options) {
            Ok(formatter) => formatter.format(value),
            Err(err) => {
                self.report(&err);
                value.to_string()
            }
        }
    }

    pub fn format_date_to_parts(
        &self,
        value: impl Into<DateValue>,
        options: &DateTimeFormatOptions,
    ) -> Result<Vec<FormatPart>> {
        self.format_date_time_to_parts(DateTimeMode::Date, value.into(), options)
    }

    pub fn format_time_to_parts(
        &self,
        value: impl Into<DateValue>,
        options: &DateTimeFormatOptions,
    ) -> Result<Vec<FormatPart>> {
        self.format_date_time_to_parts(DateTimeMode::Time, value.into(), options)
    }

    /// Parts for either date/time mode from the shared resolver.
    pub fn format_date_time_to_parts(
        &self,
        mode: DateTimeMode,
        value: DateValue,
        options: &DateTimeFormatOptions,
    ) -> Result<Vec<FormatPart>> {
        let instant = value.coerce()?;
        Ok(self.date_time_formatter(mode, options)?.format_to_parts(&instant))
    }

    pub fn format_number_to_parts(
        &self,
        value: f64,
        options: &NumberFormatOptions,
    ) -> Result<Vec<FormatPart>> {
        Ok(self.number_formatter(options)?.format_to_parts(value))
    }

    fn format_date_time(
        &self,
        mode: DateTimeMode,
        value: DateValue,
        options: &DateTimeFormatOptions,
    ) -> String {
        let result = value
            .coerce()
            .and_then(|instant| Ok(self.date_time_formatter(mode, options)?.format(&instant)));

        match result {
            Ok(text) => text,
            Err(err) => {
                self.report(&err);
                value.to_string()
            }
        }
    }

    fn resolve_date_time_options(
        &self,
        mode: DateTimeMode,
        options: &DateTimeFormatOptions,
    ) -> DateTimeFormatOptions {
        let Some(name) = options.format.as_deref() else {
            return options.clone();
        };

        let formats = match mode {
            DateTimeMode::Date => &self.config.formats.date,
            DateTimeMode::Time => &self.config.formats.time,
        };

        match formats.get(name) {
            Some(base) => options.merged_over(base),
            None => {
                self.report(&IntlError::UnknownFormat {
                    kind: mode.as_str(),
                    name: name.to_string(),
                });
                options.merged_over(&DateTimeFormatOptions::default())
            }
        }
    }

    fn resolve_number_options(&self, options: &NumberFormatOptions) -> NumberFormatOptions {
        let Some(name) = options.format.as_deref() else {
            return options.clone();
        };

        match self.config.formats.number.get(name) {
            Some(base) => options.merged_over(base),
            None => {
                self.report(&IntlError::UnknownFormat {
                    kind: "number",
                    name: name.to_string(),
                });
                options.merged_over(&NumberFormatOptions::default())
            }
        }
    }
}

impl fmt::Debug for IntlContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlContext")
            .field("locale", &self.locale)
            .field("data_locale", &self.data_locale)
            .field("time_zone", &self.config.time_zone)
            .field("text_component", &self.config.text_component)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomFormats, MonthStyle, NumberStyle, NumericStyle, PartKind};
    use parking_lot::Mutex;

    const SAMPLE_MS: i64 = 1_459_832_991_883;

    fn collecting_context(config: IntlConfig) -> (IntlContext, Arc<Mutex<Vec<String>>>) {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let handler: ErrorHandler = Arc::new(move |err: &IntlError| sink.lock().push(err.to_string()));
        let intl = IntlContext::with_error_handler(config, handler).unwrap();
        (intl, errors)
    }

    #[test]
    fn test_string_formatting() {
        let intl = IntlContext::new(IntlConfig::new("en").with_time_zone("Asia/Tokyo")).unwrap();

        assert_eq!(intl.format_date(SAMPLE_MS, &DateTimeFormatOptions::new()), "4/5/2016");
        assert_eq!(intl.format_time(SAMPLE_MS, &DateTimeFormatOptions::new()), "2:09\u{202f}PM");
        assert_eq!(intl.format_number(1234.5, &NumberFormatOptions::new()), "1,234.5");
    }

    #[test]
    fn test_parts_formatting() {
        let intl = IntlContext::new(IntlConfig::new("en").with_time_zone("Asia/Tokyo")).unwrap();
        let options = DateTimeFormatOptions::new()
            .year(NumericStyle::Numeric)
            .month(MonthStyle::Long)
            .day(NumericStyle::TwoDigit);

        let parts = intl.format_date_to_parts(SAMPLE_MS, &options).unwrap();
        assert_eq!(parts[0], FormatPart::new(PartKind::Month, "April"));
        assert_eq!(parts[2], FormatPart::new(PartKind::Day, "05"));
        assert_eq!(crate::concat_parts(&parts), intl.format_date(SAMPLE_MS, &options));

        let parts = intl.format_number_to_parts(-1.5, &NumberFormatOptions::new()).unwrap();
        assert_eq!(parts[0].kind, PartKind::MinusSign);
    }

    #[test]
    fn test_missing_value_is_epoch() {
        let intl = IntlContext::new(IntlConfig::new("en")).unwrap();
        let options = DateTimeFormatOptions::new();

        assert_eq!(intl.format_date("", &options), "1/1/1970");
        assert_eq!(intl.format_date(DateValue::Missing, &options), "1/1/1970");
        assert_eq!(intl.format_date(None::<&str>, &options), "1/1/1970");
        assert_eq!(intl.format_time("", &options), "12:00\u{202f}AM");
    }

    #[test]
    fn test_string_errors_fall_back_to_value() {
        let (intl, errors) = collecting_context(IntlConfig::new("en"));

        assert_eq!(intl.format_date("not a date", &DateTimeFormatOptions::new()), "not a date");

        let bad_currency = NumberFormatOptions::new().style(NumberStyle::Currency);
        assert_eq!(intl.format_number(42.0, &bad_currency), "42");

        let bad_zone = DateTimeFormatOptions::new().time_zone("Nowhere/Land");
        assert_eq!(intl.format_time(0_i64, &bad_zone), "0");

        assert_eq!(errors.lock().len(), 3);
    }

    #[test]
    fn test_parts_errors_propagate() {
        let (intl, errors) = collecting_context(IntlConfig::new("en"));

        let err = intl
            .format_date_to_parts("garbage", &DateTimeFormatOptions::new())
            .unwrap_err();
        assert!(matches!(err, IntlError::InvalidDate(_)));

        let bad_currency = NumberFormatOptions::new().style(NumberStyle::Currency);
        assert!(intl.format_number_to_parts(1.0, &bad_currency).is_err());
        assert!(errors.lock().is_empty());
    }

    #[test]
    fn test_named_formats() {
        let formats = CustomFormats::new()
            .with_date(
                "long",
                DateTimeFormatOptions::new()
                    .year(NumericStyle::Numeric)
                    .month(MonthStyle::Long)
                    .day(NumericStyle::Numeric),
            )
            .with_number(
                "usd",
                NumberFormatOptions::new()
                    .style(NumberStyle::Currency)
                    .currency("USD"),
            );
        let (intl, errors) = collecting_context(IntlConfig::new("en").with_formats(formats));

        assert_eq!(
            intl.format_date(SAMPLE_MS, &DateTimeFormatOptions::new().format("long")),
            "April 5, 2016"
        );
        assert_eq!(
            intl.format_number(5.0, &NumberFormatOptions::new().format("usd")),
            "$5.00"
        );

        // explicit options win over the named ones
        assert_eq!(
            intl.format_number(
                5.0,
                &NumberFormatOptions::new().format("usd").maximum_fraction_digits(0)
            ),
            "$5"
        );

        assert_eq!(
            intl.format_date(SAMPLE_MS, &DateTimeFormatOptions::new().format("missing")),
            "4/5/2016"
        );
        assert_eq!(errors.lock().as_slice(), ["No date format named: missing"]);
    }

    #[test]
    fn test_locale_fallback() {
        let (intl, errors) = collecting_context(IntlConfig::new("sw-KE").with_default_locale("de"));

        assert_eq!(intl.locale().tag(), "sw-KE");
        assert_eq!(intl.data_locale().tag(), "de");
        assert_eq!(intl.format_number(1234.5, &NumberFormatOptions::new()), "1.234,5");
        assert_eq!(errors.lock().len(), 1);

        let result = IntlContext::new(IntlConfig::new("sw").with_default_locale("xx"));
        assert!(matches!(result, Err(IntlError::UnsupportedLocale(_))));
    }

    #[test]
    fn test_regional_locale_uses_language_data() {
        let (intl, errors) = collecting_context(IntlConfig::new("fr-CA"));
        assert_eq!(intl.data_locale().tag(), "fr-CA");
        assert_eq!(intl.format_number(0.5, &NumberFormatOptions::new()), "0,5");
        assert!(errors.lock().is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(IntlContext::new(IntlConfig::new("en").with_time_zone("Mars/Base")).is_err());
    }

    #[test]
    fn test_formatters_are_cached() {
        let intl = IntlContext::new(IntlConfig::new("en")).unwrap();
        let options = DateTimeFormatOptions::new().hour(NumericStyle::Numeric);

        let a = intl.date_time_formatter(DateTimeMode::Time, &options).unwrap();
        let b = intl.date_time_formatter(DateTimeMode::Time, &options).unwrap();
        let c = intl.date_time_formatter(DateTimeMode::Date, &options).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));

        let n1 = intl.number_formatter(&NumberFormatOptions::new()).unwrap();
        let n2 = intl.number_formatter(&NumberFormatOptions::new()).unwrap();
        assert!(Arc::ptr_eq(&n1, &n2));
    }
}
