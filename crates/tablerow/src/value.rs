//! Value model shared by the mapping engine and store adapters.
//!
//! A row is carried as named pairs of [`Value`], a tagged union over the
//! three kinds a wide-column store accepts from this mapper: UTF-8 strings,
//! 64-bit signed integers, and byte sequences.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The declared or runtime kind of a [`Value`].
///
/// Used in error reporting ([`MapError::TypeMismatch`](crate::MapError))
/// and for declared-kind checks during materialization. The `Display`
/// rendering (`string`, `int64`, `bytes`) is the vocabulary used in error
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A UTF-8 string.
    String,
    /// A 64-bit signed integer.
    Integer,
    /// A variable-length byte sequence.
    Binary,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::String => write!(f, "string"),
            ValueKind::Integer => write!(f, "int64"),
            ValueKind::Binary => write!(f, "bytes"),
        }
    }
}

/// A single typed value travelling between a record field and the store.
///
/// The kind-matching in materialization is exhaustive over these variants;
/// adding a variant is a breaking change by design.
///
/// # Ordering
///
/// `Value` derives a total order (kind discriminant first, then the inner
/// value) so primary-key tuples can be compared positionally, which is how
/// rows are identified in the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    /// A UTF-8 string value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A byte-sequence value.
    Binary(Bytes),
}

impl Value {
    /// Returns the runtime kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Binary(_) => ValueKind::Binary,
        }
    }

    /// Returns the string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the binary payload, if this is a byte-sequence value.
    #[must_use]
    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Binary(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Binary(Bytes::from(value))
    }
}

/// A named value: one primary-key component or one attribute column.
///
/// # Examples
///
/// ```
/// use tablerow::KeyValue;
///
/// let pk = KeyValue::new("user_id", 42);
/// assert_eq!(pk.name, "user_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyValue {
    /// The column name identifying this entry on the wire.
    pub name: String,

    /// The value stored under the name.
    pub value: Value,
}

impl KeyValue {
    /// Creates a new named value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// The wire-level image of one row.
///
/// Produced by [`extract`](crate::extract) and returned by store reads.
/// `primary_key` is ordered ascending by the source field's primary-key
/// ordinal; `columns` is an unordered set keyed by column name. Both are
/// derived fresh on every call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowData {
    /// Ordered primary-key components identifying the row.
    pub primary_key: Vec<KeyValue>,

    /// Non-key attribute columns.
    pub columns: Vec<KeyValue>,
}
