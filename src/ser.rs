//! Serialization of a [`Value`] tree into a querystring.

mod encode;
pub(crate) mod scalar;

use encode::encode_into;
use scalar::{Scalar, normalize};

use crate::config::Config;
use crate::error::*;
use crate::value::Value;

/// Encodes a [`Value`] into a querystring using the default [`Config`].
///
/// ```
/// use qs_encode::Value;
///
/// let data = Value::from([
///     ("user", Value::from([("name", "John")])),
///     ("tags", Value::from(vec!["php", "curl"])),
/// ]);
///
/// assert_eq!(
///     qs_encode::encode(&data, &Default::default()).unwrap(),
///     "tags[]=php&tags[]=curl&user[name]=John"
/// );
/// ```
pub fn encode(data: &Value, config: &Config) -> Result<String> {
    config.encode(data)
}

/// Serializes any `Serialize` type into a querystring using the default
/// [`Config`].
///
/// ```
/// # use serde::Serialize;
/// #[derive(Serialize)]
/// struct Query {
///     name: String,
///     age: u8,
///     occupation: String,
/// }
///
/// let q = Query {
///     name: "Alice".to_owned(),
///     age: 24,
///     occupation: "Student".to_owned(),
/// };
///
/// assert_eq!(
///     qs_encode::to_string(&q).unwrap(),
///     "age=24&name=Alice&occupation=Student"
/// );
/// ```
pub fn to_string<T: serde::Serialize + ?Sized>(input: &T) -> Result<String> {
    Config::default().serialize_string(input)
}

/// The accumulator for a single encoding run.
///
/// The encoder keeps a stack of already-encoded key segments. Entering a
/// map entry or sequence element pushes a segment, leaving it pops it, so
/// encoding `{user: {name: "John"}}` pushes `user`, then `[name]`, and
/// writes `user[name]=John`.
///
/// Output is buffered internally and only handed back once the whole tree
/// has been encoded, so an error never leaves a partial querystring behind.
pub(crate) struct QsEncoder<'c> {
    config: &'c Config,
    out: String,
    first_kv: bool,
    key: Vec<String>,
    pairs: usize,
}

impl<'c> QsEncoder<'c> {
    pub(crate) fn new(config: &'c Config) -> Self {
        Self {
            config,
            out: String::with_capacity(128),
            first_kv: true,
            key: Vec::with_capacity(4),
            pairs: 0,
        }
    }

    pub(crate) fn encode(mut self, data: &Value) -> Result<String> {
        if !data.is_container() {
            return Err(Error::InvalidInput(data.type_name()));
        }
        if let Some(prefix) = self.config.prefix.as_deref().filter(|p| !p.is_empty()) {
            self.push_key(prefix, false);
        }

        match self.encode_container(data, 1) {
            Ok(()) => {
                tracing::trace!(pairs = self.pairs, len = self.out.len(), "encoded querystring");
                Ok(self.out)
            }
            Err(err) => {
                tracing::debug!(error = %err, "querystring encoding aborted");
                Err(err)
            }
        }
    }

    fn encode_container(&mut self, node: &Value, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded(self.config.max_depth));
        }

        match node {
            Value::Map(map) if self.config.sort_keys => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                for (key, value) in entries {
                    self.encode_entry(key, false, value, depth)?;
                }
            }
            Value::Map(map) => {
                for (key, value) in map {
                    self.encode_entry(key, false, value, depth)?;
                }
            }
            // sequences are always position ordered
            Value::Seq(seq) => {
                let mut buffer = itoa::Buffer::new();
                for (index, value) in seq.iter().enumerate() {
                    self.encode_entry(buffer.format(index), true, value, depth)?;
                }
            }
            other => return Err(Error::InvalidInput(other.type_name())),
        }
        Ok(())
    }

    fn encode_entry(&mut self, key: &str, is_index: bool, value: &Value, depth: usize) -> Result<()> {
        self.push_key(key, is_index);
        if value.is_container() {
            self.encode_container(value, depth + 1)?;
        } else {
            self.write_scalar(key, value)?;
        }
        self.pop_key();
        Ok(())
    }

    /// Pushes a new key segment onto the key stack.
    ///
    /// - First key "user" becomes: `user`
    /// - Second key "name" becomes: `user[name]`
    /// - A sequence element becomes `user[tags][]`, or `user[tags][0]`
    ///   when numeric indexes are preserved
    fn push_key(&mut self, newkey: &str, is_index: bool) {
        let encoding = self.config.encoding;
        let mut segment = String::with_capacity(newkey.len() + 2);
        if self.key.is_empty() {
            encode_into(&mut segment, newkey, encoding);
        } else if is_index && !self.config.preserve_numeric_indexes {
            segment.push_str("[]");
        } else {
            segment.push('[');
            encode_into(&mut segment, newkey, encoding);
            segment.push(']');
        }
        self.key.push(segment);
    }

    fn pop_key(&mut self) {
        self.key.pop();
    }

    fn write_key_stack(&mut self) {
        if self.first_kv {
            self.first_kv = false;
        } else {
            self.out.push_str(self.config.delimiter.as_str());
        }
        for segment in &self.key {
            self.out.push_str(segment);
        }
    }

    fn write_scalar(&mut self, key: &str, value: &Value) -> Result<()> {
        let text = match normalize(key, value, self.config)? {
            Scalar::Text(text) => text,
            Scalar::Omit => return Ok(()),
        };

        self.pairs += 1;
        if self.pairs > self.config.max_pairs {
            return Err(Error::PairsExceeded(self.config.max_pairs));
        }

        self.write_key_stack();
        self.out.push('=');
        encode_into(&mut self.out, &text, self.config.encoding);
        Ok(())
    }
}
