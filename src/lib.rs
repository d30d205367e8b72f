//! Nested querystring encoding.
//!
//! Querystrings are not formally defined and loosely take the form of
//! _nested_ urlencoded queries. This library encodes a tree of maps,
//! sequences and scalars into that bracket notation, compatible with
//! [qs](https://github.com/ljharb/qs), PHP's `http_build_query` and
//! [`Rack::Utils::parse_nested_query`](http://www.rubydoc.info/github/rack/rack/Rack/Utils#parse_nested_query-class_method).
//!
//! Encoding is one-directional: there is no parser.
//!
//! ## Supported Types
//!
//! At the **top level**, only maps and sequences are accepted, since a
//! querystring needs a key for every value. Below the top level any
//! [`Value`] is accepted except [`Value::Unsupported`] and non-finite
//! floats.
//!
//! Any `Serialize` type can be encoded through [`to_string`], which first
//! converts it into a [`Value`] with [`to_value`].
//!
//! ## Determinism
//!
//! With the default `sort_keys = true`, map keys are sorted at every level
//! so the same logical data always produces byte-identical output, which
//! makes the result usable for signatures and cache keys.
//!
//! ## Usage
//!
//! ```
//! use qs_encode::{Config, Encoding, NullFormat, Value};
//!
//! let data = Value::from([
//!     ("q", Value::from("New York")),
//!     ("page", Value::from(2)),
//!     ("filter", Value::from([("active", Value::from(true)), ("owner", Value::Null)])),
//!     ("tags", Value::from(vec!["php", "curl"])),
//! ]);
//!
//! assert_eq!(
//!     qs_encode::encode(&data, &Config::default()).unwrap(),
//!     "filter[active]=1&page=2&q=New%20York&tags[]=php&tags[]=curl"
//! );
//!
//! let config = Config::new()
//!     .encoding(Encoding::Rfc1738)
//!     .null_format(NullFormat::Empty)
//!     .preserve_numeric_indexes(true);
//! assert_eq!(
//!     config.encode(&data).unwrap(),
//!     "filter[active]=1&filter[owner]=&page=2&q=New+York&tags[0]=php&tags[1]=curl"
//! );
//! ```

mod config;
mod error;
mod outcome;
mod ser;
mod value;

#[doc(inline)]
pub use config::{
    BoolFormat, Config, DEFAULT_DATE_TIME_FORMAT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAIRS,
    Delimiter, Encoding, NullFormat, UnknownOption,
};
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use outcome::{Outcome, build_query};
#[doc(inline)]
pub use ser::{encode, to_string};
#[doc(inline)]
pub use value::{Map, Value, ValueSerializer, to_value};
