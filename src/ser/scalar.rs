use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

use crate::config::{BoolFormat, Config, NullFormat};
use crate::error::*;
use crate::value::Value;

/// A leaf value ready to be percent-encoded, or nothing at all.
#[derive(Debug, PartialEq)]
pub(crate) enum Scalar<'v> {
    Text(Cow<'v, str>),
    Omit,
}

/// Normalizes a leaf value into the text written after `=`.
///
/// `key` is the raw (unencoded) key the value sits under and is only used
/// for error reporting.
pub(crate) fn normalize<'v>(key: &str, value: &'v Value, config: &Config) -> Result<Scalar<'v>> {
    let text = match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Bool(b) => Cow::Borrowed(format_bool(*b, config.bool_format)),
        Value::Null => match config.null_format {
            NullFormat::Omit => return Ok(Scalar::Omit),
            NullFormat::Empty => Cow::Borrowed(""),
            NullFormat::String => Cow::Borrowed("null"),
        },
        Value::Integer(v) => Cow::Owned(itoa::Buffer::new().format(*v).to_owned()),
        Value::Unsigned(v) => Cow::Owned(itoa::Buffer::new().format(*v).to_owned()),
        Value::Float(v) => match format_float(*v) {
            Some(s) => Cow::Owned(s),
            None => return Err(Error::InvalidType(key.to_owned())),
        },
        Value::DateTime(dt) => Cow::Owned(format_date_time(key, dt, &config.date_time_format)?),
        Value::Unsupported(_) => return Err(Error::InvalidType(key.to_owned())),
        Value::Map(_) | Value::Seq(_) => return Err(Error::InvalidInput(value.type_name())),
    };
    Ok(Scalar::Text(text))
}

fn format_bool(v: bool, format: BoolFormat) -> &'static str {
    match (format, v) {
        (BoolFormat::Int, true) => "1",
        (BoolFormat::Int, false) => "0",
        (BoolFormat::Word | BoolFormat::String, true) => "true",
        (BoolFormat::Word | BoolFormat::String, false) => "false",
    }
}

/// Shortest decimal that round-trips, always in fixed notation (never
/// `1e20`), with no trailing zeros or trailing point.
/// Returns `None` for NaN and infinities.
pub(crate) fn format_float(v: f64) -> Option<String> {
    if !v.is_finite() {
        return None;
    }
    let fixed = v.to_string();
    Some(match fixed.as_str() {
        "" | "-0" => "0".to_owned(),
        _ => fixed,
    })
}

fn format_date_time(key: &str, dt: &DateTime<FixedOffset>, format: &str) -> Result<String> {
    let mut out = String::new();
    // the format was validated by `Config`, so this only fails for
    // specifiers the value itself cannot satisfy
    write!(out, "{}", dt.format(format)).map_err(|_| Error::InvalidType(key.to_owned()))?;
    Ok(out)
}
