//! Record-shaped results for callers that want `{error, message, query}`
//! rather than a `Result`.

use serde::Serialize;

use crate::config::Config;
use crate::error::{ErrorKind, Result};
use crate::value::Value;

/// The outcome of an encoding run as a flat record.
///
/// Exactly one of `message` and `query` is `Some`: `query` when `error` is
/// `false`, `message` when it is `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub error: bool,
    pub message: Option<String>,
    pub query: Option<String>,
    #[serde(skip)]
    kind: Option<ErrorKind>,
}

impl Outcome {
    /// The kind of error, if the run failed.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.kind
    }

    pub fn into_result(self) -> std::result::Result<String, String> {
        match (self.query, self.message) {
            (Some(query), _) if !self.error => Ok(query),
            (_, message) => Err(message.unwrap_or_default()),
        }
    }
}

impl From<Result<String>> for Outcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(query) => Self {
                error: false,
                message: None,
                query: Some(query),
                kind: None,
            },
            Err(err) => Self {
                error: true,
                message: Some(err.to_string()),
                query: None,
                kind: Some(err.kind()),
            },
        }
    }
}

/// Encodes `data` using the older positional call shape.
///
/// `prefix`, `delimiter` and `preserve_numeric_indexes` are applied first,
/// then every entry of `options` (see [`Config::apply_options`]) on top of
/// them, so an option record always wins over a positional argument.
/// Never fails: errors are reported through the returned [`Outcome`].
///
/// ```
/// use qs_encode::{Value, build_query};
///
/// let data = Value::from([("tags", vec!["php", "curl"])]);
///
/// let outcome = build_query(&data, None, Some(";"), Some(true), [("delimiter", "&")]);
/// assert_eq!(outcome.query.as_deref(), Some("tags[0]=php&tags[1]=curl"));
///
/// let outcome = build_query(&Value::from("scalar"), None, None, None, [("", "")]);
/// assert!(outcome.error);
/// assert!(outcome.query.is_none());
/// ```
pub fn build_query<I, K, V>(
    data: &Value,
    prefix: Option<&str>,
    delimiter: Option<&str>,
    preserve_numeric_indexes: Option<bool>,
    options: I,
) -> Outcome
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut config = Config::new();
    if let Some(prefix) = prefix {
        config = config.prefix(prefix);
    }
    if let Some(delimiter) = delimiter {
        config = config.delimiter_str(delimiter);
    }
    if let Some(preserve) = preserve_numeric_indexes {
        config = config.preserve_numeric_indexes(preserve);
    }
    config.apply_options(options).encode(data).into()
}
