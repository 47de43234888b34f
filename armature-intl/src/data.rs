//! Locale data tables
//!
//! CLDR-derived names, patterns and symbols for the locales that ship with
//! the crate. Lookup falls back from the full tag to the bare language.

use crate::Locale;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One segment of a date pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Seg {
    Year,
    Month,
    Day,
    Lit(&'static str),
}

/// Patterns for the supported year/month/day combinations.
#[derive(Debug)]
pub(crate) struct DatePatterns {
    pub full: &'static [Seg],
    pub year_month: &'static [Seg],
    pub month_day: &'static [Seg],
}

/// Where the weekday goes relative to the rest of the date.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WeekdayPlacement {
    Before(&'static str),
    After(&'static str),
}

/// Where the day period goes relative to the time fields.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DayPeriodPlacement {
    Before(&'static str),
    After(&'static str),
}

/// Where the currency goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrencyPlacement {
    Before,
    After,
}

#[derive(Debug)]
pub(crate) struct LocaleData {
    pub tag: &'static str,

    // Dates
    pub months_long: &'static [&'static str; 12],
    pub months_short: &'static [&'static str; 12],
    pub months_narrow: &'static [&'static str; 12],
    /// Monday first
    pub weekdays_long: &'static [&'static str; 7],
    pub weekdays_short: &'static [&'static str; 7],
    pub weekdays_narrow: &'static [&'static str; 7],
    pub numeric_date: DatePatterns,
    pub textual_date: DatePatterns,
    /// Numeric day and month are zero padded in full numeric dates
    pub pad_numeric_date: bool,
    pub weekday: WeekdayPlacement,
    pub date_time_separator: &'static str,

    // Times
    pub hour12: bool,
    pub day_periods: [&'static str; 2],
    pub day_period: DayPeriodPlacement,

    // Numbers
    pub decimal: &'static str,
    pub group: &'static str,
    pub min_grouping_digits: usize,
    pub currency_placement: CurrencyPlacement,
    pub currency_spacing: &'static str,
    pub percent_spacing: &'static str,
    /// Thousands, millions, billions, trillions. Empty where the locale
    /// has no abbreviation for that magnitude.
    pub compact: [&'static str; 4],
    pub compact_spacing: &'static str,
}

const NBSP: &str = "\u{a0}";
const NNBSP: &str = "\u{202f}";

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_MONTHS_NARROW: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];
const EN_WEEKDAYS: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const EN_WEEKDAYS_SHORT: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const EN_WEEKDAYS_NARROW: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

static EN: LocaleData = LocaleData {
    tag: "en",
    months_long: &EN_MONTHS,
    months_short: &EN_MONTHS_SHORT,
    months_narrow: &EN_MONTHS_NARROW,
    weekdays_long: &EN_WEEKDAYS,
    weekdays_short: &EN_WEEKDAYS_SHORT,
    weekdays_narrow: &EN_WEEKDAYS_NARROW,
    numeric_date: DatePatterns {
        full: &[Seg::Month, Seg::Lit("/"), Seg::Day, Seg::Lit("/"), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit("/"), Seg::Year],
        month_day: &[Seg::Month, Seg::Lit("/"), Seg::Day],
    },
    textual_date: DatePatterns {
        full: &[Seg::Month, Seg::Lit(" "), Seg::Day, Seg::Lit(", "), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit(" "), Seg::Year],
        month_day: &[Seg::Month, Seg::Lit(" "), Seg::Day],
    },
    pad_numeric_date: false,
    weekday: WeekdayPlacement::Before(", "),
    date_time_separator: ", ",
    hour12: true,
    day_periods: ["AM", "PM"],
    day_period: DayPeriodPlacement::After(NNBSP),
    decimal: ".",
    group: ",",
    min_grouping_digits: 1,
    currency_placement: CurrencyPlacement::Before,
    currency_spacing: NBSP,
    percent_spacing: "",
    compact: ["K", "M", "B", "T"],
    compact_spacing: "",
};

static EN_GB: LocaleData = LocaleData {
    tag: "en-GB",
    months_long: &EN_MONTHS,
    months_short: &EN_MONTHS_SHORT,
    months_narrow: &EN_MONTHS_NARROW,
    weekdays_long: &EN_WEEKDAYS,
    weekdays_short: &EN_WEEKDAYS_SHORT,
    weekdays_narrow: &EN_WEEKDAYS_NARROW,
    numeric_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit("/"), Seg::Month, Seg::Lit("/"), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit("/"), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit("/"), Seg::Month],
    },
    textual_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit(" "), Seg::Month, Seg::Lit(" "), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit(" "), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit(" "), Seg::Month],
    },
    pad_numeric_date: true,
    weekday: WeekdayPlacement::Before(" "),
    date_time_separator: ", ",
    hour12: false,
    day_periods: ["am", "pm"],
    day_period: DayPeriodPlacement::After(NNBSP),
    decimal: ".",
    group: ",",
    min_grouping_digits: 1,
    currency_placement: CurrencyPlacement::Before,
    currency_spacing: NBSP,
    percent_spacing: "",
    compact: ["K", "M", "B", "T"],
    compact_spacing: "",
};

static DE: LocaleData = LocaleData {
    tag: "de",
    months_long: &[
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    months_short: &[
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    months_narrow: &EN_MONTHS_NARROW,
    weekdays_long: &[
        "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
    ],
    weekdays_short: &["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
    weekdays_narrow: &["M", "D", "M", "D", "F", "S", "S"],
    numeric_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit("."), Seg::Month, Seg::Lit("."), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit("/"), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit("."), Seg::Month, Seg::Lit(".")],
    },
    textual_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit(". "), Seg::Month, Seg::Lit(" "), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit(" "), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit(". "), Seg::Month],
    },
    pad_numeric_date: false,
    weekday: WeekdayPlacement::Before(", "),
    date_time_separator: ", ",
    hour12: false,
    day_periods: ["AM", "PM"],
    day_period: DayPeriodPlacement::After(" "),
    decimal: ",",
    group: ".",
    min_grouping_digits: 1,
    currency_placement: CurrencyPlacement::After,
    currency_spacing: NBSP,
    percent_spacing: NBSP,
    compact: ["", "Mio.", "Mrd.", "Bio."],
    compact_spacing: NBSP,
};

static FR: LocaleData = LocaleData {
    tag: "fr",
    months_long: &[
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    months_short: &[
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
    months_narrow: &EN_MONTHS_NARROW,
    weekdays_long: &[
        "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
    ],
    weekdays_short: &["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
    weekdays_narrow: &["L", "M", "M", "J", "V", "S", "D"],
    numeric_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit("/"), Seg::Month, Seg::Lit("/"), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit("/"), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit("/"), Seg::Month],
    },
    textual_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit(" "), Seg::Month, Seg::Lit(" "), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit(" "), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit(" "), Seg::Month],
    },
    pad_numeric_date: true,
    weekday: WeekdayPlacement::Before(" "),
    date_time_separator: " ",
    hour12: false,
    day_periods: ["AM", "PM"],
    day_period: DayPeriodPlacement::After(" "),
    decimal: ",",
    group: NNBSP,
    min_grouping_digits: 1,
    currency_placement: CurrencyPlacement::After,
    currency_spacing: NBSP,
    percent_spacing: NNBSP,
    compact: ["k", "M", "Md", "Bn"],
    compact_spacing: NBSP,
};

static ES: LocaleData = LocaleData {
    tag: "es",
    months_long: &[
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    months_short: &[
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    months_narrow: &["E", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
    weekdays_long: &[
        "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
    ],
    weekdays_short: &["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
    weekdays_narrow: &["L", "M", "X", "J", "V", "S", "D"],
    numeric_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit("/"), Seg::Month, Seg::Lit("/"), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit("/"), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit("/"), Seg::Month],
    },
    textual_date: DatePatterns {
        full: &[Seg::Day, Seg::Lit(" de "), Seg::Month, Seg::Lit(" de "), Seg::Year],
        year_month: &[Seg::Month, Seg::Lit(" de "), Seg::Year],
        month_day: &[Seg::Day, Seg::Lit(" de "), Seg::Month],
    },
    pad_numeric_date: false,
    weekday: WeekdayPlacement::Before(", "),
    date_time_separator: ", ",
    hour12: false,
    day_periods: ["a. m.", "p. m."],
    day_period: DayPeriodPlacement::After(NBSP),
    decimal: ",",
    group: ".",
    min_grouping_digits: 2,
    currency_placement: CurrencyPlacement::After,
    currency_spacing: NBSP,
    percent_spacing: NBSP,
    compact: ["mil", "M", "mil M", "B"],
    compact_spacing: NBSP,
};

const JA_MONTHS: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];
const JA_WEEKDAYS_SHORT: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

static JA: LocaleData = LocaleData {
    tag: "ja",
    months_long: &JA_MONTHS,
    months_short: &JA_MONTHS,
    months_narrow: &JA_MONTHS,
    weekdays_long: &[
        "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日",
    ],
    weekdays_short: &JA_WEEKDAYS_SHORT,
    weekdays_narrow: &JA_WEEKDAYS_SHORT,
    numeric_date: DatePatterns {
        full: &[Seg::Year, Seg::Lit("/"), Seg::Month, Seg::Lit("/"), Seg::Day],
        year_month: &[Seg::Year, Seg::Lit("/"), Seg::Month],
        month_day: &[Seg::Month, Seg::Lit("/"), Seg::Day],
    },
    textual_date: DatePatterns {
        full: &[Seg::Year, Seg::Lit("年"), Seg::Month, Seg::Day, Seg::Lit("日")],
        year_month: &[Seg::Year, Seg::Lit("年"), Seg::Month],
        month_day: &[Seg::Month, Seg::Day, Seg::Lit("日")],
    },
    pad_numeric_date: false,
    weekday: WeekdayPlacement::After(""),
    date_time_separator: " ",
    hour12: false,
    day_periods: ["午前", "午後"],
    day_period: DayPeriodPlacement::Before(""),
    decimal: ".",
    group: ",",
    min_grouping_digits: 1,
    currency_placement: CurrencyPlacement::Before,
    currency_spacing: NBSP,
    percent_spacing: "",
    compact: ["K", "M", "B", "T"],
    compact_spacing: "",
};

static LOCALE_DATA: Lazy<HashMap<&'static str, &'static LocaleData>> = Lazy::new(|| {
    [&EN, &EN_GB, &DE, &FR, &ES, &JA]
        .into_iter()
        .map(|data| (data.tag, data))
        .collect()
});

/// Find the data for a locale: full tag, then language + region, then language.
pub(crate) fn locale_data(locale: &Locale) -> Option<&'static LocaleData> {
    if let Some(data) = LOCALE_DATA.get(locale.tag().as_str()) {
        return Some(*data);
    }

    if let Some(ref region) = locale.region {
        let tag = format!("{}-{}", locale.language, region);
        if let Some(data) = LOCALE_DATA.get(tag.as_str()) {
            return Some(*data);
        }
    }

    LOCALE_DATA.get(locale.language.as_str()).copied()
}
