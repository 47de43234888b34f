//! Typed format parts
//!
//! A formatter can hand back its output as an ordered list of typed parts
//! instead of a flat string. Concatenating the part values in order always
//! yields the flat string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind tag of a [`FormatPart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartKind {
    // Date and time
    Weekday,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    DayPeriod,
    TimeZoneName,

    // Numbers
    Integer,
    Group,
    Decimal,
    Fraction,
    MinusSign,
    PlusSign,
    PercentSign,
    Currency,
    Compact,
    Nan,
    Infinity,

    /// Separator text that carries no value of its own
    Literal,
}

impl PartKind {
    /// Get the part type name as reported to render functions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::DayPeriod => "dayPeriod",
            Self::TimeZoneName => "timeZoneName",
            Self::Integer => "integer",
            Self::Group => "group",
            Self::Decimal => "decimal",
            Self::Fraction => "fraction",
            Self::MinusSign => "minusSign",
            Self::PlusSign => "plusSign",
            Self::PercentSign => "percentSign",
            Self::Currency => "currency",
            Self::Compact => "compact",
            Self::Nan => "nan",
            Self::Infinity => "infinity",
            Self::Literal => "literal",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed segment of formatted output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatPart {
    /// What the segment represents
    #[serde(rename = "type")]
    pub kind: PartKind,
    /// The literal text of the segment
    pub value: String,
}

impl FormatPart {
    /// Create a new part.
    pub fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Create a literal part.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(PartKind::Literal, value)
    }
}

/// Join part values in order into the flat formatted string.
///
/// # Example
///
/// ```
/// use armature_intl::{concat_parts, FormatPart, PartKind};
///
/// let parts = vec![
///     FormatPart::new(PartKind::Integer, "1"),
///     FormatPart::new(PartKind::Group, ","),
///     FormatPart::new(PartKind::Integer, "234"),
/// ];
/// assert_eq!(concat_parts(&parts), "1,234");
/// ```
pub fn concat_parts(parts: &[FormatPart]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|p| p.value.len()).sum());
    for part in parts {
        out.push_str(&part.value);
    }
    out
}
