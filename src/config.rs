use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};

use crate::error::Result;
use crate::value::Value;

/// ISO-8601 with a numeric offset, e.g. `2014-11-28T21:45:59+09:00`.
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const DEFAULT_MAX_DEPTH: usize = 50;
pub const DEFAULT_MAX_PAIRS: usize = 10_000;

/// Configuration for encoding behavior.
///
/// `Config` is deliberately forgiving: every builder method and every
/// entry of an options record is validated on its own, and a value that
/// is out of range or unrecognised is replaced by the default rather
/// than reported. Only the data being encoded can make encoding fail.
///
/// ## Guards
///
/// `max_depth` and `max_pairs` bound the work done on adversarial or
/// accidentally huge inputs. The root container sits at depth 1, and
/// only emitted pairs count towards `max_pairs` (omitted nulls do not).
///
/// Default values: `max_depth = 50`, `max_pairs = 10000`
///
/// ```
/// use qs_encode::{Config, Value};
///
/// let data = Value::from([("a", Value::from([("b", Value::from([("c", 1)]))]))]);
///
/// let config = Config::new().max_depth(2);
/// assert!(config.encode(&data).is_err());
///
/// let config = Config::new().max_depth(3);
/// assert_eq!(config.encode(&data).unwrap(), "a[b][c]=1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) encoding: Encoding,
    pub(crate) bool_format: BoolFormat,
    pub(crate) null_format: NullFormat,
    pub(crate) date_time_format: Cow<'static, str>,
    pub(crate) max_depth: usize,
    pub(crate) max_pairs: usize,
    pub(crate) sort_keys: bool,
    pub(crate) preserve_numeric_indexes: bool,
    pub(crate) delimiter: Delimiter,
    pub(crate) prefix: Option<String>,
}

/// Percent-encoding flavour applied to keys and values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// RFC 3986: space becomes `%20`, `~` is left alone.
    #[default]
    Rfc3986,
    /// Legacy form encoding (RFC 1738): space becomes `+`.
    Rfc1738,
}

/// How booleans are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoolFormat {
    /// `1` / `0`
    #[default]
    Int,
    /// `true` / `false`
    Word,
    /// The literal text `true` / `false`.
    String,
}

/// How nulls are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullFormat {
    /// Drop the pair entirely.
    #[default]
    Omit,
    /// `key=`
    Empty,
    /// `key=null`
    String,
}

/// Separator placed between pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Ampersand,
    Semicolon,
}

impl Delimiter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Ampersand => "&",
            Delimiter::Semicolon => ";",
        }
    }
}

/// Returned by the `FromStr` impls of the option enums.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownOption(String);

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised option value `{}`", self.0)
    }
}

impl std::error::Error for UnknownOption {}

macro_rules! impl_from_str {
    ($ty:ty { $($name:literal => $variant:expr,)* }) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($name) {
                        return Ok($variant);
                    }
                )*
                Err(UnknownOption(s.to_owned()))
            }
        }
    };
}

impl_from_str!(Encoding {
    "rfc3986" => Encoding::Rfc3986,
    "rfc1738" => Encoding::Rfc1738,
});

impl_from_str!(BoolFormat {
    "int" => BoolFormat::Int,
    "word" => BoolFormat::Word,
    "string" => BoolFormat::String,
});

impl_from_str!(NullFormat {
    "omit" => NullFormat::Omit,
    "empty" => NullFormat::Empty,
    "string" => NullFormat::String,
});

impl_from_str!(Delimiter {
    "&" => Delimiter::Ampersand,
    ";" => Delimiter::Semicolon,
});

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            encoding: Encoding::Rfc3986,
            bool_format: BoolFormat::Int,
            null_format: NullFormat::Omit,
            date_time_format: Cow::Borrowed(DEFAULT_DATE_TIME_FORMAT),
            max_depth: DEFAULT_MAX_DEPTH,
            max_pairs: DEFAULT_MAX_PAIRS,
            sort_keys: true,
            preserve_numeric_indexes: false,
            delimiter: Delimiter::Ampersand,
            prefix: None,
        }
    }

    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub const fn bool_format(mut self, bool_format: BoolFormat) -> Self {
        self.bool_format = bool_format;
        self
    }

    pub const fn null_format(mut self, null_format: NullFormat) -> Self {
        self.null_format = null_format;
        self
    }

    /// Sets the chrono `strftime` format used for date/time values.
    ///
    /// A format chrono cannot parse is ignored and the default
    /// ISO-8601 format stays in effect.
    pub fn date_time_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        let format = format.into();
        if is_valid_date_time_format(&format) {
            self.date_time_format = format;
        } else {
            tracing::debug!(%format, "invalid date/time format, using default");
            self.date_time_format = Cow::Borrowed(DEFAULT_DATE_TIME_FORMAT);
        }
        self
    }

    /// Maximum nesting depth, counting the root container as 1.
    /// Zero falls back to the default of 50.
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = if max_depth == 0 {
            DEFAULT_MAX_DEPTH
        } else {
            max_depth
        };
        self
    }

    /// Maximum number of emitted pairs. Zero falls back to the default of 10000.
    pub const fn max_pairs(mut self, max_pairs: usize) -> Self {
        self.max_pairs = if max_pairs == 0 {
            DEFAULT_MAX_PAIRS
        } else {
            max_pairs
        };
        self
    }

    /// Sort map keys at every level before encoding. Default is `true`,
    /// which makes the output independent of insertion order.
    pub const fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Encode sequence elements as `a[0]=x&a[1]=y` instead of `a[]=x&a[]=y`.
    pub const fn preserve_numeric_indexes(mut self, preserve: bool) -> Self {
        self.preserve_numeric_indexes = preserve;
        self
    }

    pub const fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the delimiter from a string. Anything other than `&` or `;`
    /// falls back to `&`.
    pub fn delimiter_str(self, delimiter: &str) -> Self {
        let delimiter = delimiter.parse().unwrap_or_else(|_| {
            tracing::debug!(delimiter, "delimiter not allowed, using `&`");
            Delimiter::Ampersand
        });
        self.delimiter(delimiter)
    }

    /// Nests every top-level key under `prefix`, so `a=1` becomes `prefix[a]=1`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builds a `Config` from loosely typed `(name, value)` pairs.
    ///
    /// See [`Config::apply_options`].
    pub fn from_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::new().apply_options(options)
    }

    /// Applies loosely typed `(name, value)` pairs on top of this `Config`.
    ///
    /// Names may be given in camelCase (`maxDepth`) or snake_case
    /// (`max_depth`). Unrecognised names are ignored. A value that does not
    /// parse for a recognised name resets that option to its default.
    ///
    /// ```
    /// use qs_encode::{Config, Value};
    ///
    /// let config = Config::from_options([
    ///     ("boolFormat", "word"),
    ///     ("delimiter", "|"),
    ///     ("colour", "blue"),
    /// ]);
    /// let data: Value = [("a", true), ("b", false)].into_iter().collect();
    /// assert_eq!(config.encode(&data).unwrap(), "a=true&b=false");
    /// ```
    pub fn apply_options<I, K, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in options {
            let (name, value) = (name.as_ref(), value.as_ref());
            self = match name {
                "encoding" => self.encoding(parse_or_default(name, value)),
                "boolFormat" | "bool_format" => self.bool_format(parse_or_default(name, value)),
                "nullFormat" | "null_format" => self.null_format(parse_or_default(name, value)),
                "dateTimeFormat" | "date_time_format" => self.date_time_format(value.to_owned()),
                "maxDepth" | "max_depth" => self.max_depth(parse_or_default(name, value)),
                "maxPairs" | "max_pairs" => self.max_pairs(parse_or_default(name, value)),
                "sortKeys" | "sort_keys" => match parse_flag(value) {
                    Some(flag) => self.sort_keys(flag),
                    None => {
                        tracing::debug!(option = name, value, "invalid option value, using default");
                        self.sort_keys(true)
                    }
                },
                "preserveNumericIndexes" | "preserve_numeric_indexes" => match parse_flag(value) {
                    Some(flag) => self.preserve_numeric_indexes(flag),
                    None => {
                        tracing::debug!(option = name, value, "invalid option value, using default");
                        self.preserve_numeric_indexes(false)
                    }
                },
                "delimiter" => self.delimiter_str(value),
                _ => {
                    tracing::trace!(option = name, "ignoring unrecognised option");
                    self
                }
            };
        }
        self
    }

    /// Encodes `data` into a querystring using this `Config`.
    pub fn encode(&self, data: &Value) -> Result<String> {
        crate::ser::QsEncoder::new(self).encode(data)
    }

    /// Serializes any `Serialize` type into a querystring using this `Config`.
    ///
    /// `max_depth` already applies while the input is converted into a
    /// [`Value`], so overly deep input is rejected before it is built.
    pub fn serialize_string<T: serde::Serialize + ?Sized>(&self, input: &T) -> Result<String> {
        let value = input.serialize(crate::value::ValueSerializer::new(self.max_depth))?;
        self.encode(&value)
    }
}

/// Parses `value`, falling back to `T::default()` when it does not parse.
/// Numeric zero is handled by the builder methods.
fn parse_or_default<T: FromStr + Default>(name: &str, value: &str) -> T {
    value.trim().parse().unwrap_or_else(|_| {
        tracing::debug!(option = name, value, "invalid option value, using default");
        T::default()
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        v if v.eq_ignore_ascii_case("true") || v == "1" => Some(true),
        v if v.eq_ignore_ascii_case("false") || v == "0" => Some(false),
        _ => None,
    }
}

fn is_valid_date_time_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}
