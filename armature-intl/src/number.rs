//! Number formatting
//!
//! Locale-aware decimal, percent and currency formatting with typed parts.

use crate::data::{self, CurrencyPlacement, LocaleData};
use crate::{
    CurrencyDisplay, FormatPart, IntlError, Locale, Notation, NumberFormatOptions, NumberStyle,
    PartKind, Result, SignDisplay, concat_parts,
};

const MAX_FRACTION_DIGITS: usize = 20;
const MAX_INTEGER_DIGITS: usize = 21;

/// A resolved number formatter.
///
/// # Example
///
/// ```
/// use armature_intl::{Locale, NumberFormatOptions, NumberFormatter};
///
/// let formatter = NumberFormatter::new(&Locale::en(), &NumberFormatOptions::new()).unwrap();
/// assert_eq!(formatter.format(1234.5), "1,234.5");
///
/// let de = Locale::parse("de-DE").unwrap();
/// let formatter = NumberFormatter::new(&de, &NumberFormatOptions::new()).unwrap();
/// assert_eq!(formatter.format(1234567.89), "1.234.567,89");
/// ```
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    locale: Locale,
    data: &'static LocaleData,
    style: NumberStyle,
    currency: Option<String>,
    currency_display: CurrencyDisplay,
    use_grouping: bool,
    minimum_integer_digits: usize,
    minimum_fraction_digits: usize,
    maximum_fraction_digits: usize,
    notation: Notation,
    /// Compact notation without explicit fraction digits rounds to two
    /// significant digits
    compact_rounding: bool,
    sign_display: SignDisplay,
}

impl NumberFormatter {
    /// Resolve a formatter, validating the options.
    pub fn new(locale: &Locale, options: &NumberFormatOptions) -> Result<Self> {
        let data = data::locale_data(locale)
            .ok_or_else(|| IntlError::UnsupportedLocale(locale.tag()))?;

        let style = options.style.unwrap_or_default();

        let currency = options
            .currency
            .as_deref()
            .map(normalize_currency)
            .transpose()?;
        if style == NumberStyle::Currency && currency.is_none() {
            return Err(IntlError::invalid_option(
                "currency",
                "currency code is required with currency style",
            ));
        }

        let minimum_integer_digits = options.minimum_integer_digits.unwrap_or(1);
        if !(1..=MAX_INTEGER_DIGITS).contains(&minimum_integer_digits) {
            return Err(IntlError::invalid_option(
                "minimumIntegerDigits",
                format!("{} is out of range 1..={}", minimum_integer_digits, MAX_INTEGER_DIGITS),
            ));
        }

        let (default_min, default_max) = match style {
            NumberStyle::Decimal => (0, 3),
            NumberStyle::Percent => (0, 0),
            NumberStyle::Currency => {
                let digits = currency.as_deref().map(currency_digits).unwrap_or(2);
                (digits, digits)
            }
        };

        let (minimum_fraction_digits, maximum_fraction_digits) = match (
            options.minimum_fraction_digits,
            options.maximum_fraction_digits,
        ) {
            (None, None) => (default_min, default_max),
            (Some(min), None) => (min, min.max(default_max)),
            (None, Some(max)) => (default_min.min(max), max),
            (Some(min), Some(max)) => (min, max),
        };

        if maximum_fraction_digits > MAX_FRACTION_DIGITS {
            return Err(IntlError::invalid_option(
                "maximumFractionDigits",
                format!("{} is out of range 0..={}", maximum_fraction_digits, MAX_FRACTION_DIGITS),
            ));
        }
        if minimum_fraction_digits > maximum_fraction_digits {
            return Err(IntlError::invalid_option(
                "minimumFractionDigits",
                format!(
                    "{} is greater than maximumFractionDigits {}",
                    minimum_fraction_digits, maximum_fraction_digits
                ),
            ));
        }

        let notation = options.notation.unwrap_or_default();
        let compact_rounding = notation == Notation::Compact
            && options.minimum_fraction_digits.is_none()
            && options.maximum_fraction_digits.is_none();

        Ok(Self {
            locale: locale.clone(),
            data,
            style,
            currency,
            currency_display: options.currency_display.unwrap_or_default(),
            use_grouping: options.use_grouping.unwrap_or(true),
            minimum_integer_digits,
            minimum_fraction_digits,
            maximum_fraction_digits,
            notation,
            compact_rounding,
            sign_display: options.sign_display.unwrap_or_default(),
        })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn style(&self) -> NumberStyle {
        self.style
    }

    /// Resolved `(minimum, maximum)` fraction digits.
    pub fn fraction_digits(&self) -> (usize, usize) {
        (self.minimum_fraction_digits, self.maximum_fraction_digits)
    }

    /// Format a number to a string.
    pub fn format(&self, n: f64) -> String {
        concat_parts(&self.format_to_parts(n))
    }

    /// Format a number to typed parts, in display order.
    pub fn format_to_parts(&self, n: f64) -> Vec<FormatPart> {
        let mut number = Vec::new();
        let mut is_zero = false;

        if n.is_nan() {
            number.push(FormatPart::new(PartKind::Nan, "NaN"));
        } else if n.is_infinite() {
            number.push(FormatPart::new(PartKind::Infinity, "∞"));
        } else {
            let mut value = n.abs();
            if self.style == NumberStyle::Percent {
                value *= 100.0;
            }

            let (integer, fraction, compact) = self.digits(value);
            is_zero = integer.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0');

            self.push_integer(&integer, &mut number);
            if !fraction.is_empty() {
                number.push(FormatPart::new(PartKind::Decimal, self.data.decimal));
                number.push(FormatPart::new(PartKind::Fraction, fraction));
            }
            if let Some(index) = compact {
                push_literal(&mut number, self.data.compact_spacing);
                number.push(FormatPart::new(PartKind::Compact, self.data.compact[index]));
            }
        }

        if self.style == NumberStyle::Percent {
            push_literal(&mut number, self.data.percent_spacing);
            number.push(FormatPart::new(PartKind::PercentSign, "%"));
        }

        let negative = n.is_sign_negative() && !n.is_nan();
        let sign = match self.sign_display {
            SignDisplay::Auto if negative => Some(PartKind::MinusSign),
            SignDisplay::Always if negative => Some(PartKind::MinusSign),
            SignDisplay::Always if !n.is_nan() => Some(PartKind::PlusSign),
            SignDisplay::ExceptZero if is_zero || n.is_nan() => None,
            SignDisplay::ExceptZero if negative => Some(PartKind::MinusSign),
            SignDisplay::ExceptZero => Some(PartKind::PlusSign),
            _ => None,
        };

        let mut parts = Vec::with_capacity(number.len() + 3);
        if let Some(kind) = sign {
            let symbol = if kind == PartKind::MinusSign { "-" } else { "+" };
            parts.push(FormatPart::new(kind, symbol));
        }

        match self.currency.as_deref() {
            Some(code) if self.style == NumberStyle::Currency => {
                let symbol = currency_symbol(code, self.currency_display, self.data);
                let spaced = self.currency_display == CurrencyDisplay::Code
                    || symbol.chars().last().is_some_and(char::is_alphabetic);

                match self.data.currency_placement {
                    CurrencyPlacement::Before => {
                        parts.push(FormatPart::new(PartKind::Currency, symbol));
                        if spaced {
                            push_literal(&mut parts, self.data.currency_spacing);
                        }
                        parts.extend(number);
                    }
                    CurrencyPlacement::After => {
                        parts.extend(number);
                        push_literal(&mut parts, self.data.currency_spacing);
                        parts.push(FormatPart::new(PartKind::Currency, symbol));
                    }
                }
            }
            _ => parts.extend(number),
        }

        parts
    }

    /// Round `value` and split it into integer digits, fraction digits and
    /// the compact suffix index.
    fn digits(&self, value: f64) -> (String, String, Option<usize>) {
        if self.notation != Notation::Compact {
            let (integer, fraction) = self.split_digits(
                value,
                self.minimum_fraction_digits,
                self.maximum_fraction_digits,
            );
            return (integer, fraction, None);
        }

        let mut exponent = if value >= 1000.0 {
            ((value.log10().floor() as usize) / 3).min(4)
        } else {
            0
        };

        loop {
            let scaled = value / 10f64.powi(3 * exponent as i32);
            let (min, max) = if self.compact_rounding {
                (0, usize::from(scaled < 10.0))
            } else {
                (self.minimum_fraction_digits, self.maximum_fraction_digits)
            };

            if round_half_away(scaled, max).0.len() > 3 && exponent < 4 {
                exponent += 1;
                continue;
            }

            let index = exponent.checked_sub(1);
            if index.is_some_and(|i| self.data.compact[i].is_empty()) {
                let (min, max) = if self.compact_rounding {
                    (0, 0)
                } else {
                    (self.minimum_fraction_digits, self.maximum_fraction_digits)
                };
                let (integer, fraction) = self.split_digits(value, min, max);
                return (integer, fraction, None);
            }

            let (integer, fraction) = self.split_digits(scaled, min, max);
            return (integer, fraction, index);
        }
    }

    fn split_digits(&self, value: f64, min: usize, max: usize) -> (String, String) {
        let (integer, mut fraction) = round_half_away(value, max);
        while fraction.len() > min && fraction.ends_with('0') {
            fraction.pop();
        }

        let integer = if integer.len() < self.minimum_integer_digits {
            format!("{:0>width$}", integer, width = self.minimum_integer_digits)
        } else {
            integer
        };

        (integer, fraction)
    }

    fn push_integer(&self, integer: &str, parts: &mut Vec<FormatPart>) {
        let len = integer.len();
        // Compact notation groups only from five integer digits
        let min_grouping = if self.notation == Notation::Compact {
            self.data.min_grouping_digits.max(2)
        } else {
            self.data.min_grouping_digits
        };
        if !self.use_grouping || len < 3 + min_grouping {
            parts.push(FormatPart::new(PartKind::Integer, integer));
            return;
        }

        let head = match len % 3 {
            0 => 3,
            n => n,
        };
        parts.push(FormatPart::new(PartKind::Integer, &integer[..head]));

        let mut start = head;
        while start < len {
            parts.push(FormatPart::new(PartKind::Group, self.data.group));
            parts.push(FormatPart::new(PartKind::Integer, &integer[start..start + 3]));
            start += 3;
        }
    }
}

/// Round a non-negative finite value half away from zero at `digits`
/// fraction digits, returning the integer and fraction digit strings.
///
/// Rounding works on the shortest decimal representation of the value, so
/// `1.005` rounds to `1.01` even though its binary value is slightly below.
fn round_half_away(value: f64, digits: usize) -> (String, String) {
    let repr = format!("{:e}", value);
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);

    let mut significand: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    // Count of integer digits; zero or negative for values below one
    let mut point = exponent + 1;

    let keep = point + digits as i64;
    if keep < 0 {
        significand.clear();
    } else if (keep as usize) < significand.len() {
        let keep = keep as usize;
        let round_up = significand[keep] >= 5;
        significand.truncate(keep);

        if round_up {
            let mut i = significand.len();
            loop {
                if i == 0 {
                    significand.insert(0, 1);
                    point += 1;
                    break;
                }
                i -= 1;
                if significand[i] == 9 {
                    significand[i] = 0;
                } else {
                    significand[i] += 1;
                    break;
                }
            }
        }
    }

    let digit_at = |index: i64| -> char {
        usize::try_from(index)
            .ok()
            .and_then(|i| significand.get(i))
            .map_or('0', |d| char::from(b'0' + d))
    };

    let integer = if point <= 0 {
        "0".to_string()
    } else {
        (0..point).map(digit_at).collect()
    };
    let fraction = (0..digits as i64).map(|i| digit_at(point + i)).collect();

    (integer, fraction)
}

fn push_literal(parts: &mut Vec<FormatPart>, text: &str) {
    if !text.is_empty() {
        parts.push(FormatPart::literal(text));
    }
}

fn normalize_currency(code: &str) -> Result<String> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(IntlError::invalid_option(
            "currency",
            format!("\"{}\" is not a well-formed ISO 4217 code", code),
        ))
    }
}

/// ISO 4217 minor unit digits.
fn currency_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "PYG" | "UGX" | "XAF" | "XOF" => 0,
        "BHD" | "JOD" | "KWD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

fn currency_symbol(code: &str, display: CurrencyDisplay, data: &LocaleData) -> String {
    if display == CurrencyDisplay::Code {
        return code.to_string();
    }

    let narrow = display == CurrencyDisplay::NarrowSymbol;
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" if data.tag == "ja" => "￥",
        "JPY" => "¥",
        "CNY" if narrow => "¥",
        "CNY" => "CN¥",
        "KRW" => "₩",
        "INR" => "₹",
        "RUB" if narrow => "₽",
        "BRL" => "R$",
        "ILS" => "₪",
        "VND" => "₫",
        "CAD" | "AUD" | "MXN" | "HKD" | "NZD" | "TWD" if narrow => "$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "MXN" => "MX$",
        "HKD" => "HK$",
        "NZD" => "NZ$",
        "TWD" => "NT$",
        _ => code,
    };
    symbol.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(locale: &str, options: NumberFormatOptions, n: f64) -> String {
        let locale = Locale::parse(locale).unwrap();
        NumberFormatter::new(&locale, &options).unwrap().format(n)
    }

    fn currency(code: &str) -> NumberFormatOptions {
        NumberFormatOptions::new()
            .style(NumberStyle::Currency)
            .currency(code)
    }

    #[test]
    fn test_decimal_parts() {
        let formatter = NumberFormatter::new(&Locale::en(), &NumberFormatOptions::new()).unwrap();
        assert_eq!(
            formatter.format_to_parts(1234.5),
            vec![
                FormatPart::new(PartKind::Integer, "1"),
                FormatPart::new(PartKind::Group, ","),
                FormatPart::new(PartKind::Integer, "234"),
                FormatPart::new(PartKind::Decimal, "."),
                FormatPart::new(PartKind::Fraction, "5"),
            ]
        );
        assert_eq!(formatter.format(1234.5), "1,234.5");
    }

    #[test]
    fn test_decimal_per_locale() {
        let none = NumberFormatOptions::new;
        assert_eq!(fmt("de", none(), 1234567.891), "1.234.567,891");
        assert_eq!(fmt("fr", none(), 1234567.891), "1\u{202f}234\u{202f}567,891");
        assert_eq!(fmt("es", none(), 1234.5), "1234,5");
        assert_eq!(fmt("es", none(), 12345.0), "12.345");
        assert_eq!(fmt("ja", none(), 100.0), "100");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let none = NumberFormatOptions::new;
        assert_eq!(fmt("en", none().maximum_fraction_digits(0), 2.5), "3");
        assert_eq!(fmt("en", none().maximum_fraction_digits(0), -2.5), "-3");
        assert_eq!(fmt("en", none().maximum_fraction_digits(2), 0.125), "0.13");
        assert_eq!(fmt("en", none(), 1.23456), "1.235");
    }

    #[test]
    fn test_rounding_uses_decimal_digits() {
        let two = || NumberFormatOptions::new().maximum_fraction_digits(2);
        let formatted: Vec<String> = [1.005, 0.615, 1.045, 2.675]
            .into_iter()
            .map(|n| fmt("en", two(), n))
            .collect();
        assert_eq!(formatted, ["1.01", "0.62", "1.05", "2.68"]);

        assert_eq!(fmt("en", two(), -1.005), "-1.01");
        assert_eq!(fmt("en", two(), 0.0096), "0.01");
        assert_eq!(fmt("en", two(), 0.0004), "0");
        assert_eq!(fmt("en", two(), 9.995), "10");
        assert_eq!(
            fmt("en", two().minimum_fraction_digits(2), 1e21),
            "1,000,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn test_fraction_digit_resolution() {
        let none = NumberFormatOptions::new;
        assert_eq!(fmt("en", none().minimum_fraction_digits(2), 1.5), "1.50");
        assert_eq!(fmt("en", none().minimum_fraction_digits(2), 1.23456), "1.235");
        assert_eq!(fmt("en", none().minimum_integer_digits(3), 5.0), "005");
        assert_eq!(fmt("en", none().use_grouping(false), 1234567.0), "1234567");
    }

    #[test]
    fn test_invalid_digit_options() {
        let options = NumberFormatOptions::new()
            .minimum_fraction_digits(3)
            .maximum_fraction_digits(1);
        let err = NumberFormatter::new(&Locale::en(), &options).unwrap_err();
        assert!(matches!(err, IntlError::InvalidOption { option: "minimumFractionDigits", .. }));

        let options = NumberFormatOptions::new().maximum_fraction_digits(21);
        assert!(NumberFormatter::new(&Locale::en(), &options).is_err());

        let options = NumberFormatOptions::new().minimum_integer_digits(0);
        assert!(NumberFormatter::new(&Locale::en(), &options).is_err());
    }

    #[test]
    fn test_percent() {
        let percent = || NumberFormatOptions::new().style(NumberStyle::Percent);
        assert_eq!(fmt("en", percent(), 0.256), "26%");
        assert_eq!(fmt("de", percent(), 0.12), "12\u{a0}%");
        assert_eq!(fmt("fr", percent(), -0.5), "-50\u{202f}%");
    }

    #[test]
    fn test_currency() {
        assert_eq!(fmt("en", currency("USD"), 1234.5), "$1,234.50");
        assert_eq!(fmt("en", currency("usd"), -1234.5), "-$1,234.50");
        assert_eq!(fmt("de", currency("EUR"), 1234.5), "1.234,50\u{a0}€");
        assert_eq!(fmt("en", currency("JPY"), 1234.5), "¥1,235");
        assert_eq!(fmt("ja", currency("JPY"), 1234.0), "￥1,234");
        assert_eq!(fmt("en", currency("CHF"), 1234.5), "CHF\u{a0}1,234.50");
        assert_eq!(fmt("en", currency("CAD"), 10.0), "CA$10.00");
        assert_eq!(
            fmt("en", currency("CAD").currency_display(CurrencyDisplay::NarrowSymbol), 10.0),
            "$10.00"
        );
        assert_eq!(
            fmt("en", currency("USD").currency_display(CurrencyDisplay::Code), 1234.5),
            "USD\u{a0}1,234.50"
        );
    }

    #[test]
    fn test_currency_parts() {
        let de = Locale::parse("de-DE").unwrap();
        let formatter = NumberFormatter::new(&de, &currency("EUR")).unwrap();
        let kinds: Vec<PartKind> = formatter
            .format_to_parts(-5.0)
            .into_iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::MinusSign,
                PartKind::Integer,
                PartKind::Decimal,
                PartKind::Fraction,
                PartKind::Literal,
                PartKind::Currency,
            ]
        );
    }

    #[test]
    fn test_currency_validation() {
        let options = NumberFormatOptions::new().style(NumberStyle::Currency);
        let err = NumberFormatter::new(&Locale::en(), &options).unwrap_err();
        assert!(matches!(err, IntlError::InvalidOption { option: "currency", .. }));

        assert!(NumberFormatter::new(&Locale::en(), &currency("US")).is_err());
        assert!(NumberFormatter::new(&Locale::en(), &currency("U$D")).is_err());
    }

    #[test]
    fn test_compact() {
        let compact = || NumberFormatOptions::new().notation(Notation::Compact);
        assert_eq!(fmt("en", compact(), 950.0), "950");
        assert_eq!(fmt("en", compact(), 1234.0), "1.2K");
        assert_eq!(fmt("en", compact(), 12345.0), "12K");
        assert_eq!(fmt("en", compact(), 1_500_000.0), "1.5M");
        assert_eq!(fmt("en", compact(), 999_999.0), "1M");
        assert_eq!(fmt("en", compact(), -2_000_000_000.0), "-2B");
        assert_eq!(fmt("de", compact(), 1_500_000.0), "1,5\u{a0}Mio.");
        assert_eq!(fmt("de", compact(), 1234.0), "1234");
        assert_eq!(fmt("de", compact(), 12345.6), "12.346");
        assert_eq!(fmt("de", compact(), 999_999.0), "1\u{a0}Mio.");
        assert_eq!(fmt("en", compact().maximum_fraction_digits(2), 1234.0), "1.23K");
    }

    #[test]
    fn test_sign_display() {
        let sign = |display| NumberFormatOptions::new().sign_display(display);
        assert_eq!(fmt("en", sign(SignDisplay::Always), 5.0), "+5");
        assert_eq!(fmt("en", sign(SignDisplay::Always), 0.0), "+0");
        assert_eq!(fmt("en", sign(SignDisplay::ExceptZero), 0.0), "0");
        assert_eq!(fmt("en", sign(SignDisplay::ExceptZero), 0.0001), "0");
        assert_eq!(fmt("en", sign(SignDisplay::ExceptZero), -3.0), "-3");
        assert_eq!(fmt("en", sign(SignDisplay::ExceptZero), 3.0), "+3");
        assert_eq!(fmt("en", sign(SignDisplay::Never), -3.0), "3");
        assert_eq!(fmt("en", NumberFormatOptions::new(), -0.0), "-0");
    }

    #[test]
    fn test_non_finite() {
        let none = NumberFormatOptions::new;
        assert_eq!(fmt("en", none(), f64::NAN), "NaN");
        assert_eq!(fmt("en", none(), f64::INFINITY), "∞");
        assert_eq!(fmt("en", none(), f64::NEG_INFINITY), "-∞");
        assert_eq!(
            fmt("en", NumberFormatOptions::new().style(NumberStyle::Percent), f64::INFINITY),
            "∞%"
        );
    }

    #[test]
    fn test_parts_concatenate_to_string() {
        let option_sets = [
            NumberFormatOptions::new(),
            NumberFormatOptions::new().style(NumberStyle::Percent),
            currency("EUR"),
            NumberFormatOptions::new().notation(Notation::Compact),
        ];

        for locale in ["en", "de", "fr", "es", "ja"] {
            let locale = Locale::parse(locale).unwrap();
            for options in &option_sets {
                let formatter = NumberFormatter::new(&locale, options).unwrap();
                for n in [0.0, -1.5, 1234.5678, 9_876_543.21, f64::NAN] {
                    let parts = formatter.format_to_parts(n);
                    assert_eq!(concat_parts(&parts), formatter.format(n));
                    assert!(parts.iter().all(|p| !p.value.is_empty()));
                }
            }
        }
    }
}
