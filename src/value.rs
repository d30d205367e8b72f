//! The input tree accepted by the encoder.

mod ser;

pub use ser::{ValueSerializer, to_value};

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use indexmap::IndexMap;

/// Map type used for [`Value::Map`]. Keeps insertion order, which is the
/// order used when `sort_keys` is disabled.
pub type Map = IndexMap<String, Value>;

/// A nested value to be encoded.
///
/// Only `Map` and `Seq` are accepted at the top level. Every other variant
/// is a leaf and becomes the value half of a `key=value` pair.
///
/// ```
/// use qs_encode::Value;
///
/// let user = Value::from([
///     ("name", Value::from("John")),
///     ("tags", Value::from(vec!["php", "curl"])),
/// ]);
/// let data = Value::from([("user", user)]);
///
/// assert_eq!(
///     qs_encode::encode(&data, &Default::default()).unwrap(),
///     "user[name]=John&user[tags][]=php&user[tags][]=curl"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    Map(Map),
    Seq(Vec<Value>),
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    #[default]
    Null,
    DateTime(DateTime<FixedOffset>),
    /// A value with no querystring representation, tagged with a
    /// description of what it was. Encoding one fails with
    /// [`Error::InvalidType`](crate::Error::InvalidType).
    Unsupported(&'static str),
}

impl Value {
    /// Human readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Map(_) => "map",
            Value::Seq(_) => "sequence",
            Value::String(_) => "string",
            Value::Integer(_) | Value::Unsigned(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::DateTime(_) => "date/time",
            Value::Unsupported(what) => *what,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Seq(_))
    }
}

macro_rules! from_integer {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

from_integer!(Integer: i8, i16, i32, i64);
from_integer!(Unsigned: u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Unsigned(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f32_to_f64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::String(v.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::DateTime(v.fixed_offset())
    }
}

/// Naive date/times are taken to be UTC.
impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v.and_utc().fixed_offset())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Value {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        v.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        v.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>, S> From<IndexMap<K, V, S>> for Value {
    fn from(v: IndexMap<K, V, S>) -> Self {
        v.into_iter().collect()
    }
}

/// Collects `(key, value)` entries into a [`Value::Map`]. A repeated key
/// keeps its first position and its last value.
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Widens through the shortest decimal representation, so `0.1f32`
/// becomes `0.1` rather than `0.10000000149011612`.
pub(crate) fn f32_to_f64(v: f32) -> f64 {
    let mut buffer = ryu::Buffer::new();
    buffer.format(v).parse().unwrap_or(v as f64)
}
