//! Locale-aware formatting context for Armature
//!
//! Provides the formatting services used by the `Formatted*` components:
//!
//! - **Dates and Times**: field-based date/time formatting in any IANA zone
//! - **Numbers**: decimal, percent, currency and compact notation
//! - **Parts**: every formatter can emit typed parts whose concatenation
//!   equals its string output
//! - **Context**: a configured, cached formatting context with error
//!   reporting
//!
//! # Quick Start
//!
//! ```
//! use armature_intl::{DateTimeFormatOptions, IntlConfig, IntlContext, MonthStyle, NumericStyle};
//!
//! let intl = IntlContext::new(IntlConfig::new("en").with_time_zone("Asia/Tokyo")).unwrap();
//!
//! let options = DateTimeFormatOptions::new()
//!     .year(NumericStyle::Numeric)
//!     .month(MonthStyle::Long)
//!     .day(NumericStyle::TwoDigit);
//!
//! assert_eq!(intl.format_date(1459832991883_i64, &options), "April 05, 2016");
//! ```
//!
//! # Parts
//!
//! ```
//! use armature_intl::{IntlConfig, IntlContext, NumberFormatOptions, PartKind};
//!
//! let intl = IntlContext::new(IntlConfig::new("en")).unwrap();
//! let parts = intl.format_number_to_parts(1234.5, &NumberFormatOptions::new()).unwrap();
//!
//! assert_eq!(parts[1].kind, PartKind::Group);
//! assert_eq!(parts[1].value, ",");
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use armature_intl::IntlConfig;
//!
//! let config = IntlConfig::from_file("config/intl.toml")?;
//! // or ARMATURE_INTL_LOCALE, ARMATURE_INTL_TIME_ZONE, ...
//! let config = IntlConfig::from_env();
//! ```

mod config;
mod context;
mod data;
mod datetime;
mod error;
mod locale;
mod number;
mod options;
mod parts;

pub use config::{CustomFormats, ENV_PREFIX, IntlConfig};
pub use context::{ErrorHandler, IntlContext, default_error_handler};
pub use datetime::{DateTimeFormatter, DateTimeMode, DateValue, parse_time_zone};
pub use error::IntlError;
pub use locale::Locale;
pub use number::NumberFormatter;
pub use options::{
    CurrencyDisplay, DateTimeFormatOptions, MonthStyle, Notation, NumberFormatOptions,
    NumberStyle, NumericStyle, SignDisplay, TextStyle, TimeZoneNameStyle,
};
pub use parts::{FormatPart, PartKind, concat_parts};

/// Result type for intl operations
pub type Result<T> = std::result::Result<T, IntlError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        DateTimeFormatOptions, DateValue, FormatPart, IntlConfig, IntlContext, IntlError, Locale,
        MonthStyle, NumberFormatOptions, NumberStyle, NumericStyle, PartKind, Result,
        concat_parts,
    };
}
