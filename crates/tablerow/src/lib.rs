//! Typed record ↔ row mapping for wide-column table stores.
//!
//! This crate converts between user-defined record types and the row
//! representation used by wide-column key-value stores: an ordered
//! primary-key tuple plus a set of named attribute columns. It eliminates
//! field-by-field marshaling for reads and writes against rows identified
//! by a composite primary key.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │        (record types declared with record! { .. })          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       tablerow                              │
//! │              extract / materialize                          │
//! │   (Record trait, Value model, column/pk-ordinal metadata)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   tablerow-store                            │
//! │        TableStore trait, Table row operations               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use tablerow::{extract, materialize, record};
//!
//! record! {
//!     /// One row in the user table.
//!     pub struct User {
//!         org: string { column: "org_id", pk: "1" },
//!         id: i64 { column: "user_id", pk: "2" },
//!         name: string { column: "display_name" },
//!         avatar: bytes {},
//!     }
//! }
//!
//! # fn main() -> Result<(), tablerow::MapError> {
//! let user = User {
//!     org: Some("acme".into()),
//!     id: Some(42),
//!     name: Some("Alice".into()),
//!     avatar: None,
//! };
//!
//! // Record -> row: ordered primary key plus attribute columns.
//! let row = extract(&user)?;
//! assert_eq!(row.primary_key.len(), 2);
//! assert_eq!(row.columns.len(), 1); // unset fields are omitted
//!
//! // Row -> record: write retrieved values back into a fresh record.
//! let mut fetched = User::default();
//! materialize(&mut fetched, &row.primary_key, &row.columns)?;
//! assert_eq!(fetched.name.as_deref(), Some("Alice"));
//! # Ok(())
//! # }
//! ```
//!
//! # Supported field types
//!
//! Every mapped field is an optional value of exactly one of three kinds:
//! `Option<String>`, `Option<i64>`, or `Option<Bytes>`. Unset fields are
//! skipped during extraction, which lets partial records (for example,
//! key-only lookups) extract cleanly. Any other declared type is reported
//! as [`MapError::InvalidFieldType`].
//!
//! # Primary-key ordering
//!
//! Primary-key components are ordered ascending by their ordinal, compared
//! as a **raw string** (`"10"` sorts before `"2"`). Two records of the same
//! type always emit the key tuple in the same column order, which is what
//! row identity in the underlying store depends on.
//!
//! # Error Handling
//!
//! Both operations return [`MapResult<T>`] and fail fast: the first
//! violation aborts the remaining work in that call. All errors are
//! recoverable by the caller (typically by fixing the record schema).

pub mod error;
pub mod mapper;
pub mod record;
pub mod value;

pub use error::{MapError, MapResult, PairContext};
pub use mapper::{extract, materialize};
pub use record::{Field, FieldMut, FieldSlot, FieldValue, Record};
pub use value::{KeyValue, RowData, Value, ValueKind};

// Re-exported for the `record!` macro and for callers declaring binary fields.
pub use bytes::Bytes;
