//! Date and time formatting
//!
//! [`DateTimeFormatter`] is the resolver shared by the date and time
//! components. The two differ only in their [`DateTimeMode`], which decides
//! the default fields when the caller requests none.

use crate::data::{self, DayPeriodPlacement, LocaleData, Seg, WeekdayPlacement};
use crate::{
    DateTimeFormatOptions, FormatPart, IntlError, Locale, MonthStyle, NumericStyle, PartKind,
    Result, TextStyle, TimeZoneNameStyle, concat_parts,
};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc,
};
use chrono_tz::Tz;
use std::fmt;
use std::time::SystemTime;

/// Sub-mode of the date/time resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeMode {
    /// Defaults to year, month and day
    Date,
    /// Defaults to hour and minute
    Time,
}

impl DateTimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for DateTimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value handed to a date or time formatter.
///
/// Values are coerced to an instant with [`DateValue::coerce`]:
///
/// - `Instant` is used as-is
/// - `Millis` is milliseconds since the Unix epoch
/// - `Text` is an ISO-like date string; an empty string is the epoch
/// - `Missing` is the epoch
///
/// # Example
///
/// ```
/// use armature_intl::DateValue;
///
/// let epoch = DateValue::from("").coerce().unwrap();
/// assert_eq!(epoch.timestamp_millis(), 0);
///
/// let day = DateValue::from("2016-04-06").coerce().unwrap();
/// assert_eq!(day.to_rfc3339(), "2016-04-06T00:00:00+00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateValue {
    Instant(DateTime<Utc>),
    Millis(i64),
    Text(String),
    #[default]
    Missing,
}

impl DateValue {
    /// Resolve the value to an instant.
    pub fn coerce(&self) -> Result<DateTime<Utc>> {
        match self {
            Self::Instant(instant) => Ok(*instant),
            Self::Millis(ms) => DateTime::from_timestamp_millis(*ms)
                .ok_or_else(|| IntlError::InvalidDate(ms.to_string())),
            Self::Text(text) if text.is_empty() => Ok(DateTime::<Utc>::default()),
            Self::Text(text) => parse_date_text(text),
            Self::Missing => Ok(DateTime::<Utc>::default()),
        }
    }
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` or `YYYY-MM-DD`.
///
/// Strings without an offset are read as UTC.
fn parse_date_text(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| IntlError::InvalidDate(text.to_string()))
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instant(instant) => write!(f, "{}", instant.to_rfc3339()),
            Self::Millis(ms) => write!(f, "{}", ms),
            Self::Text(text) => f.write_str(text),
            Self::Missing => Ok(()),
        }
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl From<DateTime<FixedOffset>> for DateValue {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        Self::Instant(instant.with_timezone(&Utc))
    }
}

impl From<SystemTime> for DateValue {
    fn from(time: SystemTime) -> Self {
        Self::Instant(time.into())
    }
}

impl From<i64> for DateValue {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for DateValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T: Into<DateValue>> From<Option<T>> for DateValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Missing)
    }
}

/// Parse an IANA time zone identifier.
pub fn parse_time_zone(zone: &str) -> Result<Tz> {
    zone.parse::<Tz>()
        .map_err(|_| IntlError::InvalidTimeZone(zone.to_string()))
}

/// A resolved date/time formatter.
///
/// # Example
///
/// ```
/// use armature_intl::{DateTimeFormatter, DateTimeFormatOptions, DateTimeMode, Locale};
/// use armature_intl::{MonthStyle, NumericStyle};
/// use chrono::{TimeZone, Utc};
///
/// let options = DateTimeFormatOptions::new()
///     .year(NumericStyle::Numeric)
///     .month(MonthStyle::Long)
///     .day(NumericStyle::Numeric);
/// let locale = Locale::parse("en-US").unwrap();
/// let formatter = DateTimeFormatter::new(&locale, DateTimeMode::Date, &options, None).unwrap();
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// assert_eq!(formatter.format(&instant), "January 15, 2024");
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    locale: Locale,
    data: &'static LocaleData,
    mode: DateTimeMode,
    options: DateTimeFormatOptions,
    time_zone: Tz,
    hour12: bool,
}

impl DateTimeFormatter {
    /// Resolve a formatter.
    ///
    /// `default_time_zone` applies when the options carry no time zone;
    /// without either the formatter works in UTC.
    pub fn new(
        locale: &Locale,
        mode: DateTimeMode,
        options: &DateTimeFormatOptions,
        default_time_zone: Option<&str>,
    ) -> Result<Self> {
        let data = data::locale_data(locale)
            .ok_or_else(|| IntlError::UnsupportedLocale(locale.tag()))?;

        let time_zone = match options.time_zone.as_deref().or(default_time_zone) {
            Some(zone) => parse_time_zone(zone)?,
            None => Tz::UTC,
        };

        let mut options = options.clone();
        options.format = None;
        match mode {
            DateTimeMode::Date if !options.has_date_fields() && !options.has_time_fields() => {
                options.year = Some(NumericStyle::Numeric);
                options.month = Some(MonthStyle::Numeric);
                options.day = Some(NumericStyle::Numeric);
            }
            DateTimeMode::Time if !options.has_time_fields() => {
                options.hour = Some(NumericStyle::Numeric);
                options.minute = Some(NumericStyle::Numeric);
            }
            _ => {}
        }

        let hour12 = options.hour12.unwrap_or(data.hour12);

        Ok(Self {
            locale: locale.clone(),
            data,
            mode,
            options,
            time_zone,
            hour12,
        })
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn mode(&self) -> DateTimeMode {
        self.mode
    }

    /// Options after defaults were applied.
    pub fn resolved_options(&self) -> &DateTimeFormatOptions {
        &self.options
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Whether the formatter uses a 12-hour clock.
    pub fn hour12(&self) -> bool {
        self.hour12
    }

    /// Format an instant to a string.
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        concat_parts(&self.format_to_parts(instant))
    }

    /// Format an instant to typed parts, in display order.
    pub fn format_to_parts(&self, instant: &DateTime<Utc>) -> Vec<FormatPart> {
        let local = instant.with_timezone(&self.time_zone);
        let mut parts = Vec::new();

        if self.options.has_date_fields() {
            self.push_date_parts(&local, &mut parts);
        }

        if self.options.has_time_fields() {
            if !parts.is_empty() {
                push_literal(&mut parts, self.data.date_time_separator);
            }
            self.push_time_parts(&local, &mut parts);
        }

        if let Some(style) = self.options.time_zone_name {
            if !parts.is_empty() {
                push_literal(&mut parts, " ");
            }
            let offset = local.offset().fix().local_minus_utc();
            parts.push(FormatPart::new(
                PartKind::TimeZoneName,
                self.zone_name(offset, style),
            ));
        }

        parts
    }

    fn push_date_parts(&self, local: &DateTime<Tz>, parts: &mut Vec<FormatPart>) {
        let o = &self.options;
        let textual = o.month.is_some_and(|m| m.is_textual());
        let patterns = if textual {
            &self.data.textual_date
        } else {
            &self.data.numeric_date
        };

        let pattern: Vec<Seg> = match (o.year.is_some(), o.month.is_some(), o.day.is_some()) {
            (true, true, true) => patterns.full.to_vec(),
            (true, true, false) => patterns.year_month.to_vec(),
            (false, true, true) => patterns.month_day.to_vec(),
            (true, false, true) => without_month(patterns.full),
            (true, false, false) => vec![Seg::Year],
            (false, true, false) => vec![Seg::Month],
            (false, false, true) => vec![Seg::Day],
            (false, false, false) => Vec::new(),
        };

        let pad = self.data.pad_numeric_date
            && !textual
            && o.year.is_some()
            && o.month.is_some()
            && o.day.is_some();

        let mut date = Vec::with_capacity(pattern.len());
        for seg in pattern {
            match seg {
                Seg::Year => {
                    let year = match o.year {
                        Some(NumericStyle::TwoDigit) => {
                            format!("{:02}", local.year().rem_euclid(100))
                        }
                        _ => local.year().to_string(),
                    };
                    date.push(FormatPart::new(PartKind::Year, year));
                }
                Seg::Month => {
                    let month = local.month();
                    let index = month0(local);
                    let value = match o.month {
                        Some(MonthStyle::TwoDigit) => format!("{:02}", month),
                        Some(MonthStyle::Long) => self.data.months_long[index].to_string(),
                        Some(MonthStyle::Short) => self.data.months_short[index].to_string(),
                        Some(MonthStyle::Narrow) => self.data.months_narrow[index].to_string(),
                        _ if pad => format!("{:02}", month),
                        _ => month.to_string(),
                    };
                    date.push(FormatPart::new(PartKind::Month, value));
                }
                Seg::Day => {
                    let day = local.day();
                    let value = match o.day {
                        Some(NumericStyle::TwoDigit) => format!("{:02}", day),
                        _ if pad => format!("{:02}", day),
                        _ => day.to_string(),
                    };
                    date.push(FormatPart::new(PartKind::Day, value));
                }
                Seg::Lit(text) => push_literal(&mut date, text),
            }
        }

        let Some(style) = o.weekday else {
            parts.extend(date);
            return;
        };

        let index = local.weekday().num_days_from_monday() as usize;
        let name = match style {
            TextStyle::Long => self.data.weekdays_long[index],
            TextStyle::Short => self.data.weekdays_short[index],
            TextStyle::Narrow => self.data.weekdays_narrow[index],
        };
        let weekday = FormatPart::new(PartKind::Weekday, name);

        if date.is_empty() {
            parts.push(weekday);
            return;
        }

        match self.data.weekday {
            WeekdayPlacement::Before(sep) => {
                parts.push(weekday);
                push_literal(parts, sep);
                parts.extend(date);
            }
            WeekdayPlacement::After(sep) => {
                parts.extend(date);
                push_literal(parts, sep);
                parts.push(weekday);
            }
        }
    }

    fn push_time_parts(&self, local: &DateTime<Tz>, parts: &mut Vec<FormatPart>) {
        let o = &self.options;
        let mut fields: Vec<FormatPart> = Vec::with_capacity(3);

        if let Some(style) = o.hour {
            let hour = local.hour();
            let value = if self.hour12 {
                let h = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                match style {
                    NumericStyle::Numeric => h.to_string(),
                    NumericStyle::TwoDigit => format!("{:02}", h),
                }
            } else {
                format!("{:02}", hour)
            };
            fields.push(FormatPart::new(PartKind::Hour, value));
        }

        if let Some(style) = o.minute {
            let value = padded_unless_alone(local.minute(), style, !fields.is_empty());
            fields.push(FormatPart::new(PartKind::Minute, value));
        }

        if let Some(style) = o.second {
            let value = padded_unless_alone(local.second(), style, !fields.is_empty());
            fields.push(FormatPart::new(PartKind::Second, value));
        }

        let mut time = Vec::with_capacity(fields.len() * 2);
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                push_literal(&mut time, ":");
            }
            time.push(field);
        }

        if !(self.hour12 && o.hour.is_some()) {
            parts.extend(time);
            return;
        }

        let period = self.data.day_periods[usize::from(local.hour() >= 12)];
        let period = FormatPart::new(PartKind::DayPeriod, period);
        match self.data.day_period {
            DayPeriodPlacement::Before(sep) => {
                parts.push(period);
                push_literal(parts, sep);
                parts.extend(time);
            }
            DayPeriodPlacement::After(sep) => {
                parts.extend(time);
                push_literal(parts, sep);
                parts.push(period);
            }
        }
    }

    fn zone_name(&self, offset_secs: i32, style: TimeZoneNameStyle) -> String {
        match style {
            TimeZoneNameStyle::Short if offset_secs == 0 && is_utc_zone(self.time_zone) => {
                "UTC".to_string()
            }
            TimeZoneNameStyle::Short | TimeZoneNameStyle::ShortOffset => gmt_offset(offset_secs, false),
            TimeZoneNameStyle::LongOffset => gmt_offset(offset_secs, true),
        }
    }
}

fn month0(local: &DateTime<Tz>) -> usize {
    local.month0() as usize
}

fn padded_unless_alone(value: u32, style: NumericStyle, follows_field: bool) -> String {
    if follows_field || style == NumericStyle::TwoDigit {
        format!("{:02}", value)
    } else {
        value.to_string()
    }
}

fn without_month(full: &[Seg]) -> Vec<Seg> {
    let mut out = Vec::with_capacity(full.len());
    let mut skip_literal = false;
    for seg in full {
        match seg {
            Seg::Month => skip_literal = true,
            Seg::Lit(_) if skip_literal => skip_literal = false,
            other => {
                skip_literal = false;
                out.push(*other);
            }
        }
    }
    out
}

fn push_literal(parts: &mut Vec<FormatPart>, text: &str) {
    if !text.is_empty() {
        parts.push(FormatPart::literal(text));
    }
}

fn is_utc_zone(zone: Tz) -> bool {
    matches!(
        zone.name(),
        "UTC" | "Etc/UTC" | "Etc/UCT" | "UCT" | "Etc/Universal" | "Universal" | "Etc/Zulu" | "Zulu"
    )
}

fn gmt_offset(offset_secs: i32, long: bool) -> String {
    if offset_secs == 0 {
        return "GMT".to_string();
    }

    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;

    if long {
        format!("GMT{}{:02}:{:02}", sign, hours, minutes)
    } else if minutes == 0 {
        format!("GMT{}{}", sign, hours)
    } else {
        format!("GMT{}{}:{:02}", sign, hours, minutes)
    }
}
