//! Formatted value components
//!
//! [`Formatted<K>`] is the one generic component behind
//! [`FormattedDate`], [`FormattedTime`] and [`FormattedNumber`]. The kind
//! parameter picks the value type, the option type and the context
//! operations; everything else (the string/parts branching and the render
//! functions) is shared.
//!
//! # String mode
//!
//! The value is formatted to a string. A `children` render function
//! receives it; without one the string is wrapped in the context's text
//! component, or emitted bare when none is configured.
//!
//! # Parts mode
//!
//! With `should_format_to_parts(true)` the value is formatted to typed
//! parts and handed to the `children_parts` render function, which is
//! required.
//!
//! ```
//! use armature_formatted::{FormattedDate, IntlProvider, Node};
//! use armature_intl::{DateTimeFormatOptions, FormatPart, IntlConfig, MonthStyle, NumericStyle, PartKind};
//!
//! let provider = IntlProvider::new(IntlConfig::new("en").with_time_zone("Asia/Tokyo")).unwrap();
//!
//! let date = FormattedDate::new(1459832991883_i64)
//!     .options(
//!         DateTimeFormatOptions::new()
//!             .year(NumericStyle::Numeric)
//!             .month(MonthStyle::Long)
//!             .day(NumericStyle::TwoDigit),
//!     )
//!     .should_format_to_parts(true)
//!     .children_parts(|parts: &[FormatPart]| {
//!         let day = parts.iter().find(|p| p.kind == PartKind::Day).map(|p| p.value.clone());
//!         Node::element("b", [Node::text(day.unwrap_or_default())])
//!     });
//!
//! assert_eq!(provider.render([date.into()]).unwrap().to_html(), "<b>05</b>");
//! ```

use crate::render::invariant_intl_context;
use crate::{Component, FormattedError, Node, Result};
use armature_intl::{
    DateTimeFormatOptions, DateValue, FormatPart, IntlContext, IntlError, NumberFormatOptions,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Render function receiving the formatted string.
pub type StringRenderFn = Arc<dyn Fn(&str) -> Node + Send + Sync>;

/// Render function receiving the formatted parts.
pub type PartsRenderFn = Arc<dyn Fn(&[FormatPart]) -> Node + Send + Sync>;

/// The value kinds a formatted component can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Date,
    Time,
    Number,
}

impl FormatKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Date => "FormattedDate",
            Self::Time => "FormattedTime",
            Self::Number => "FormattedNumber",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Kind-specific formatting behind [`Formatted`].
pub trait FormatterKind: Send + Sync + 'static {
    type Value: Clone + fmt::Debug + Send + Sync;
    type Options: Clone + Default + fmt::Debug + Send + Sync;

    const KIND: FormatKind;

    fn format_to_string(
        intl: &IntlContext,
        value: &Self::Value,
        options: &Self::Options,
    ) -> String;

    fn format_to_parts(
        intl: &IntlContext,
        value: &Self::Value,
        options: &Self::Options,
    ) -> armature_intl::Result<Vec<FormatPart>>;
}

/// Date kind marker.
#[derive(Debug)]
pub enum DateKind {}

/// Time kind marker.
#[derive(Debug)]
pub enum TimeKind {}

/// Number kind marker.
#[derive(Debug)]
pub enum NumberKind {}

impl FormatterKind for DateKind {
    type Value = DateValue;
    type Options = DateTimeFormatOptions;

    const KIND: FormatKind = FormatKind::Date;

    fn format_to_string(intl: &IntlContext, value: &DateValue, options: &Self::Options) -> String {
        intl.format_date(value.clone(), options)
    }

    fn format_to_parts(
        intl: &IntlContext,
        value: &DateValue,
        options: &Self::Options,
    ) -> armature_intl::Result<Vec<FormatPart>> {
        intl.format_date_to_parts(value.clone(), options)
    }
}

impl FormatterKind for TimeKind {
    type Value = DateValue;
    type Options = DateTimeFormatOptions;

    const KIND: FormatKind = FormatKind::Time;

    fn format_to_string(intl: &IntlContext, value: &DateValue, options: &Self::Options) -> String {
        intl.format_time(value.clone(), options)
    }

    fn format_to_parts(
        intl: &IntlContext,
        value: &DateValue,
        options: &Self::Options,
    ) -> armature_intl::Result<Vec<FormatPart>> {
        intl.format_time_to_parts(value.clone(), options)
    }
}

impl FormatterKind for NumberKind {
    type Value = f64;
    type Options = NumberFormatOptions;

    const KIND: FormatKind = FormatKind::Number;

    fn format_to_string(intl: &IntlContext, value: &f64, options: &Self::Options) -> String {
        intl.format_number(*value, options)
    }

    fn format_to_parts(
        intl: &IntlContext,
        value: &f64,
        options: &Self::Options,
    ) -> armature_intl::Result<Vec<FormatPart>> {
        intl.format_number_to_parts(*value, options)
    }
}

/// A component formatting one value of kind `K`.
pub struct Formatted<K: FormatterKind> {
    value: K::Value,
    options: K::Options,
    should_format_to_parts: bool,
    render_string: Option<StringRenderFn>,
    render_parts: Option<PartsRenderFn>,
    _kind: PhantomData<fn() -> K>,
}

/// Formats the date portion of an instant.
pub type FormattedDate = Formatted<DateKind>;

/// Formats the time portion of an instant.
pub type FormattedTime = Formatted<TimeKind>;

/// Formats a number.
pub type FormattedNumber = Formatted<NumberKind>;

impl<K: FormatterKind> Formatted<K> {
    pub fn new(value: impl Into<K::Value>) -> Self {
        Self {
            value: value.into(),
            options: K::Options::default(),
            should_format_to_parts: false,
            render_string: None,
            render_parts: None,
            _kind: PhantomData,
        }
    }

    /// Options passed through to the formatter.
    pub fn options(mut self, options: K::Options) -> Self {
        self.options = options;
        self
    }

    /// Format to typed parts instead of a string.
    pub fn should_format_to_parts(mut self, enabled: bool) -> Self {
        self.should_format_to_parts = enabled;
        self
    }

    /// Render function for string mode.
    pub fn children(mut self, render: impl Fn(&str) -> Node + Send + Sync + 'static) -> Self {
        self.render_string = Some(Arc::new(render));
        self
    }

    /// Render function for parts mode.
    pub fn children_parts(
        mut self,
        render: impl Fn(&[FormatPart]) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.render_parts = Some(Arc::new(render));
        self
    }

    pub fn kind(&self) -> FormatKind {
        K::KIND
    }

    pub fn value(&self) -> &K::Value {
        &self.value
    }

    pub fn into_node(self) -> Node {
        Node::Component(Arc::new(self))
    }

    /// Render against an optional context, failing when it is absent.
    pub fn render_with(&self, intl: Option<&IntlContext>) -> Result<Node> {
        let intl = invariant_intl_context(intl, K::KIND.display_name())?;
        self.render_formatted(intl)
    }

    fn render_formatted(&self, intl: &IntlContext) -> Result<Node> {
        if self.should_format_to_parts {
            let render_parts =
                self.render_parts
                    .as_ref()
                    .ok_or_else(|| FormattedError::RenderFnRequired {
                        component: K::KIND.display_name().to_string(),
                    })?;

            let parts = K::format_to_parts(intl, &self.value, &self.options)?;
            return Ok(render_parts(&parts));
        }

        let formatted = K::format_to_string(intl, &self.value, &self.options);

        if let Some(render_string) = &self.render_string {
            return Ok(render_string(&formatted));
        }

        Ok(match intl.text_component() {
            Some(tag) => Node::element(tag, [Node::Text(formatted)]),
            None => Node::Text(formatted),
        })
    }
}

impl<K: FormatterKind> Component for Formatted<K> {
    fn display_name(&self) -> &str {
        K::KIND.display_name()
    }

    fn render(&self, intl: &IntlContext) -> Result<Node> {
        self.render_formatted(intl)
    }
}

impl<K: FormatterKind> Clone for Formatted<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            options: self.options.clone(),
            should_format_to_parts: self.should_format_to_parts,
            render_string: self.render_string.clone(),
            render_parts: self.render_parts.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: FormatterKind> fmt::Debug for Formatted<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::KIND.display_name())
            .field("value", &self.value)
            .field("options", &self.options)
            .field("should_format_to_parts", &self.should_format_to_parts)
            .field("children", &self.render_string.is_some())
            .field("children_parts", &self.render_parts.is_some())
            .finish()
    }
}

impl<K: FormatterKind> From<Formatted<K>> for Node {
    fn from(formatted: Formatted<K>) -> Self {
        formatted.into_node()
    }
}

// ========== Dynamic factory ==========

/// An untyped input value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    Instant(DateTime<Utc>),
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<DateTime<Utc>> for RawValue {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Options for either formatter family.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatOptions {
    DateTime(DateTimeFormatOptions),
    Number(NumberFormatOptions),
}

impl From<DateTimeFormatOptions> for FormatOptions {
    fn from(options: DateTimeFormatOptions) -> Self {
        Self::DateTime(options)
    }
}

impl From<NumberFormatOptions> for FormatOptions {
    fn from(options: NumberFormatOptions) -> Self {
        Self::Number(options)
    }
}

/// Everything needed to build a formatted component at runtime.
#[derive(Clone)]
pub struct FormatRequest {
    pub kind: FormatKind,
    pub value: RawValue,
    pub options: Option<FormatOptions>,
    pub should_format_to_parts: bool,
    pub render_string: Option<StringRenderFn>,
    pub render_parts: Option<PartsRenderFn>,
}

impl FormatRequest {
    pub fn new(kind: FormatKind, value: impl Into<RawValue>) -> Self {
        Self {
            kind,
            value: value.into(),
            options: None,
            should_format_to_parts: false,
            render_string: None,
            render_parts: None,
        }
    }

    pub fn options(mut self, options: impl Into<FormatOptions>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn should_format_to_parts(mut self, enabled: bool) -> Self {
        self.should_format_to_parts = enabled;
        self
    }

    pub fn children(mut self, render: impl Fn(&str) -> Node + Send + Sync + 'static) -> Self {
        self.render_string = Some(Arc::new(render));
        self
    }

    pub fn children_parts(
        mut self,
        render: impl Fn(&[FormatPart]) -> Node + Send + Sync + 'static,
    ) -> Self {
        self.render_parts = Some(Arc::new(render));
        self
    }
}

impl fmt::Debug for FormatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRequest")
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("options", &self.options)
            .field("should_format_to_parts", &self.should_format_to_parts)
            .finish_non_exhaustive()
    }
}

/// A formatted component of any kind.
#[derive(Debug, Clone)]
pub enum AnyFormatted {
    Date(FormattedDate),
    Time(FormattedTime),
    Number(FormattedNumber),
}

impl AnyFormatted {
    pub fn kind(&self) -> FormatKind {
        match self {
            Self::Date(_) => FormatKind::Date,
            Self::Time(_) => FormatKind::Time,
            Self::Number(_) => FormatKind::Number,
        }
    }
}

impl Component for AnyFormatted {
    fn display_name(&self) -> &str {
        self.kind().display_name()
    }

    fn render(&self, intl: &IntlContext) -> Result<Node> {
        match self {
            Self::Date(c) => c.render(intl),
            Self::Time(c) => c.render(intl),
            Self::Number(c) => c.render(intl),
        }
    }
}

impl From<AnyFormatted> for Node {
    fn from(formatted: AnyFormatted) -> Self {
        Node::component(formatted)
    }
}

/// Build the component matching `request.kind`.
///
/// Date and time kinds accept instants, epoch milliseconds, date strings
/// and missing values. The number kind accepts numbers and numeric text.
///
/// ```
/// use armature_formatted::{FormatKind, FormatRequest, IntlProvider, create_formatted_component};
/// use armature_intl::IntlConfig;
///
/// let component = create_formatted_component(FormatRequest::new(FormatKind::Number, 0.5)).unwrap();
/// let provider = IntlProvider::new(IntlConfig::new("fr")).unwrap();
///
/// assert_eq!(provider.render([component.into()]).unwrap().text_content(), "0,5");
/// ```
pub fn create_formatted_component(request: FormatRequest) -> Result<AnyFormatted> {
    let FormatRequest {
        kind,
        value,
        options,
        should_format_to_parts,
        render_string,
        render_parts,
    } = request;

    Ok(match kind {
        FormatKind::Date => AnyFormatted::Date(with_render(
            FormattedDate::new(date_value(value)?).options(date_time_options(kind, options)?),
            should_format_to_parts,
            render_string,
            render_parts,
        )),
        FormatKind::Time => AnyFormatted::Time(with_render(
            FormattedTime::new(date_value(value)?).options(date_time_options(kind, options)?),
            should_format_to_parts,
            render_string,
            render_parts,
        )),
        FormatKind::Number => AnyFormatted::Number(with_render(
            FormattedNumber::new(number_value(value)?).options(number_options(options)?),
            should_format_to_parts,
            render_string,
            render_parts,
        )),
    })
}

fn with_render<K: FormatterKind>(
    mut component: Formatted<K>,
    should_format_to_parts: bool,
    render_string: Option<StringRenderFn>,
    render_parts: Option<PartsRenderFn>,
) -> Formatted<K> {
    component.should_format_to_parts = should_format_to_parts;
    component.render_string = render_string;
    component.render_parts = render_parts;
    component
}

fn date_value(value: RawValue) -> Result<DateValue> {
    Ok(match value {
        RawValue::Instant(instant) => DateValue::Instant(instant),
        RawValue::Number(ms) if ms.is_finite() => DateValue::Millis(ms.trunc() as i64),
        RawValue::Number(ms) => return Err(IntlError::InvalidDate(ms.to_string()).into()),
        RawValue::Text(text) => DateValue::Text(text),
        RawValue::Missing => DateValue::Missing,
    })
}

fn number_value(value: RawValue) -> Result<f64> {
    match value {
        RawValue::Number(n) => Ok(n),
        RawValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| IntlError::InvalidNumber(text).into()),
        RawValue::Instant(instant) => Err(IntlError::InvalidNumber(instant.to_rfc3339()).into()),
        RawValue::Missing => Err(IntlError::InvalidNumber("missing value".to_string()).into()),
    }
}

fn date_time_options(
    kind: FormatKind,
    options: Option<FormatOptions>,
) -> Result<DateTimeFormatOptions> {
    match options {
        None => Ok(DateTimeFormatOptions::default()),
        Some(FormatOptions::DateTime(options)) => Ok(options),
        Some(FormatOptions::Number(_)) => Err(FormattedError::from(IntlError::invalid_option(
            "options",
            format!("number options passed to {}", kind.display_name()),
        ))),
    }
}

fn number_options(options: Option<FormatOptions>) -> Result<NumberFormatOptions> {
    match options {
        None => Ok(NumberFormatOptions::default()),
        Some(FormatOptions::Number(options)) => Ok(options),
        Some(FormatOptions::DateTime(_)) => Err(FormattedError::from(IntlError::invalid_option(
            "options",
            "date/time options passed to FormattedNumber",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntlProvider, render_with};
    use armature_intl::{IntlConfig, NumberStyle, PartKind, concat_parts};
    use std::sync::Mutex;

    fn intl(config: IntlConfig) -> IntlContext {
        IntlContext::new(config).unwrap()
    }

    #[test]
    fn test_string_mode_bare_text() {
        let intl = intl(IntlConfig::new("en"));
        let node = FormattedNumber::new(1234.5).render(&intl).unwrap();
        assert!(matches!(node, Node::Text(ref s) if s == "1,234.5"));
    }

    #[test]
    fn test_string_mode_text_component() {
        let intl = intl(IntlConfig::new("en").with_text_component("span"));
        let node = FormattedNumber::new(1234.5).render(&intl).unwrap();
        let markup = render_with(&node, Some(&intl)).unwrap();
        assert_eq!(markup.to_html(), "<span>1,234.5</span>");
    }

    #[test]
    fn test_string_render_fn_bypasses_wrapper() {
        let intl = intl(IntlConfig::new("en").with_text_component("span"));
        let node = FormattedTime::new(0_i64)
            .children(|s: &str| Node::text(format!("[{}]", s)))
            .render(&intl)
            .unwrap();
        assert!(matches!(node, Node::Text(ref s) if s == "[12:00\u{202f}AM]"));
    }

    #[test]
    fn test_parts_mode_requires_render_fn() {
        let intl = intl(IntlConfig::new("en"));
        let err = FormattedDate::new(0_i64)
            .should_format_to_parts(true)
            .children(|s: &str| Node::text(s))
            .render(&intl)
            .unwrap_err();

        match err {
            FormattedError::RenderFnRequired { component } => assert_eq!(component, "FormattedDate"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parts_mode_checks_render_fn_before_formatting() {
        // the value is invalid, yet the missing render function is reported
        let intl = intl(IntlConfig::new("en"));
        let err = FormattedDate::new("not a date")
            .should_format_to_parts(true)
            .render(&intl)
            .unwrap_err();
        assert!(matches!(err, FormattedError::RenderFnRequired { .. }));
    }

    #[test]
    fn test_parts_mode_passes_parts() {
        let intl = intl(IntlConfig::new("de"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let node = FormattedNumber::new(-1234.5)
            .should_format_to_parts(true)
            .children_parts(move |parts: &[FormatPart]| {
                sink.lock().unwrap().extend_from_slice(parts);
                Node::text(concat_parts(parts))
            })
            .render(&intl)
            .unwrap();

        assert!(matches!(node, Node::Text(ref s) if s == "-1.234,5"));
        let kinds: Vec<PartKind> = seen.lock().unwrap().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::MinusSign,
                PartKind::Integer,
                PartKind::Group,
                PartKind::Integer,
                PartKind::Decimal,
                PartKind::Fraction,
            ]
        );
    }

    #[test]
    fn test_parts_mode_propagates_format_errors() {
        let intl = intl(IntlConfig::new("en"));
        let err = FormattedNumber::new(1.0)
            .options(NumberFormatOptions::new().style(NumberStyle::Currency))
            .should_format_to_parts(true)
            .children_parts(|_: &[FormatPart]| Node::Empty)
            .render(&intl)
            .unwrap_err();
        assert!(matches!(err, FormattedError::Intl(IntlError::InvalidOption { .. })));
    }

    #[test]
    fn test_render_with_missing_context() {
        let err = FormattedTime::new(DateValue::Missing).render_with(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[Armature Intl] Could not find required intl context for <FormattedTime>. \
             Wrap the tree in an IntlProvider."
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(FormattedDate::new("").display_name(), "FormattedDate");
        assert_eq!(FormattedTime::new("").display_name(), "FormattedTime");
        assert_eq!(FormattedNumber::new(1.0).display_name(), "FormattedNumber");
        assert_eq!(FormattedNumber::new(1.0).kind(), FormatKind::Number);
    }

    #[test]
    fn test_factory_dispatches_on_kind() {
        let provider = IntlProvider::new(IntlConfig::new("en")).unwrap();

        let date = create_formatted_component(FormatRequest::new(FormatKind::Date, "")).unwrap();
        let time = create_formatted_component(FormatRequest::new(FormatKind::Time, 0_i64)).unwrap();
        let number =
            create_formatted_component(FormatRequest::new(FormatKind::Number, "42.5")).unwrap();

        assert_eq!(date.kind(), FormatKind::Date);
        assert_eq!(time.display_name(), "FormattedTime");

        let markup = provider
            .render([date.into(), Node::text(" "), time.into(), Node::text(" "), number.into()])
            .unwrap();
        assert_eq!(markup.text_content(), "1/1/1970 12:00\u{202f}AM 42.5");
    }

    #[test]
    fn test_factory_truncates_fractional_millis() {
        let component =
            create_formatted_component(FormatRequest::new(FormatKind::Date, 1459832991883.9))
                .unwrap();
        match component {
            AnyFormatted::Date(date) => {
                assert_eq!(date.value(), &DateValue::Millis(1_459_832_991_883))
            }
            other => panic!("unexpected component: {:?}", other),
        }
    }

    #[test]
    fn test_factory_rejects_mismatched_inputs() {
        let non_numeric = FormatRequest::new(FormatKind::Number, "abc");
        assert!(matches!(
            create_formatted_component(non_numeric),
            Err(FormattedError::Intl(IntlError::InvalidNumber(_)))
        ));

        let missing = FormatRequest::new(FormatKind::Number, RawValue::Missing);
        assert!(create_formatted_component(missing).is_err());

        let nan_date = FormatRequest::new(FormatKind::Date, f64::NAN);
        assert!(create_formatted_component(nan_date).is_err());

        let wrong_options = FormatRequest::new(FormatKind::Time, 0_i64)
            .options(NumberFormatOptions::new());
        assert!(matches!(
            create_formatted_component(wrong_options),
            Err(FormattedError::Intl(IntlError::InvalidOption { option: "options", .. }))
        ));
    }

    #[test]
    fn test_factory_carries_render_fns() {
        let intl = intl(IntlConfig::new("en"));
        let request = FormatRequest::new(FormatKind::Number, 0.25)
            .options(NumberFormatOptions::new().style(NumberStyle::Percent))
            .should_format_to_parts(true)
            .children_parts(|parts: &[FormatPart]| Node::text(parts[0].value.clone()));

        let node = create_formatted_component(request).unwrap().render(&intl).unwrap();
        assert!(matches!(node, Node::Text(ref s) if s == "25"));
    }
}
