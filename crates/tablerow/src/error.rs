//! Mapping error types and result alias.
//!
//! Both mapping operations are fail-fast: the first violation aborts the
//! remaining work in that call and is returned to the immediate caller.
//! There is no local recovery or retry inside the mapping engine; every
//! error is recoverable by the caller (typically by fixing the record
//! schema).

use thiserror::Error;

use crate::value::ValueKind;

/// Result type alias for mapping operations.
pub type MapResult<T> = Result<T, MapError>;

/// Identifies which half of a row a failing pair came from.
///
/// Rendered into [`MapError::TypeMismatch`] messages so callers can tell
/// `primary key "id"` apart from `column "name"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairContext {
    /// The pair is a primary-key component.
    PrimaryKey,
    /// The pair is an attribute column.
    Column,
}

impl std::fmt::Display for PairContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairContext::PrimaryKey => write!(f, "primary key"),
            PairContext::Column => write!(f, "column"),
        }
    }
}

/// Errors produced by [`extract`](crate::extract) and
/// [`materialize`](crate::materialize).
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]`; new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// A field's declared type is outside the supported set.
    ///
    /// Only optional string, optional 64-bit integer, and optional byte
    /// sequence fields can be mapped. Reported by extraction for any such
    /// field, and by materialization when a returned pair names one.
    #[error(
        "field {field} has invalid type: {declared}. \
         Only optional string, int64, and bytes fields are allowed"
    )]
    InvalidFieldType {
        /// The offending field's name.
        field: String,
        /// The field's declared Rust type.
        declared: String,
    },

    /// A returned value's runtime kind does not match the target field's
    /// declared kind.
    #[error("{context} {name:?}: expected {expected}, but got {actual}")]
    TypeMismatch {
        /// Whether the failing pair came from the primary-key tuple or the
        /// attribute set.
        context: PairContext,
        /// The pair's column name.
        name: String,
        /// The field's declared kind.
        expected: ValueKind,
        /// The value's runtime kind.
        actual: ValueKind,
    },
}

impl MapError {
    /// Creates a new `InvalidFieldType` error for the given field.
    #[must_use]
    pub fn invalid_field_type(field: impl Into<String>, declared: impl Into<String>) -> Self {
        Self::InvalidFieldType { field: field.into(), declared: declared.into() }
    }

    /// Creates a new `TypeMismatch` error for the given pair.
    #[must_use]
    pub fn type_mismatch(
        context: PairContext,
        name: impl Into<String>,
        expected: ValueKind,
        actual: ValueKind,
    ) -> Self {
        Self::TypeMismatch { context, name: name.into(), expected, actual }
    }
}
