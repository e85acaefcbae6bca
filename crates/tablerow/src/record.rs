//! Record field metadata and the `record!` declaration macro.
//!
//! The mapping engine never inspects types at runtime. Instead, every
//! mappable type implements [`Record`], a field-metadata accessor that
//! exposes, for each field in declaration order: the field name, an
//! optional column name, an optional primary-key ordinal, and a typed view
//! of the field's `Option` slot (read-only for extraction, mutable for
//! materialization).
//!
//! Most callers declare record types with [`record!`](crate::record),
//! which generates the struct and its `Record` impl. Hand-written impls
//! are supported and are the escape hatch for reporting fields whose
//! declared type falls outside the supported set (see
//! [`FieldValue::Unsupported`]).

use bytes::Bytes;

use crate::value::ValueKind;

/// Field-metadata accessor for a mappable record type.
///
/// Both methods report fields in declaration order. Implementations must
/// return the same metadata (names, columns, ordinals) from both methods;
/// the two differ only in the kind of access they grant to the field slot.
///
/// Implemented automatically by [`record!`](crate::record).
pub trait Record {
    /// Returns read-only views of every field, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Returns mutable views of every field, in declaration order.
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}

/// Read-only view of one record field and its metadata.
#[derive(Debug)]
pub struct Field<'a> {
    /// The Rust field name, used in error messages and as the column-name
    /// fallback.
    pub name: &'static str,

    /// The wire-level column name, if declared.
    pub column: Option<&'static str>,

    /// The primary-key ordinal, if this field is a key component. Ordinals
    /// are compared as raw strings to order the key tuple.
    pub pk_ordinal: Option<&'static str>,

    /// The current value of the field.
    pub value: FieldValue<'a>,
}

impl Field<'_> {
    /// The column name this field maps to: the declared column, or the
    /// field name when no (or an empty) column was declared.
    #[must_use]
    pub fn effective_column(&self) -> &'static str {
        effective_column(self.column, self.name)
    }
}

/// Mutable view of one record field and its metadata.
#[derive(Debug)]
pub struct FieldMut<'a> {
    /// The Rust field name.
    pub name: &'static str,

    /// The wire-level column name, if declared.
    pub column: Option<&'static str>,

    /// The primary-key ordinal, if this field is a key component.
    pub pk_ordinal: Option<&'static str>,

    /// Writable handle for the field.
    pub slot: FieldSlot<'a>,
}

impl FieldMut<'_> {
    /// The column name this field maps to: the declared column, or the
    /// field name when no (or an empty) column was declared.
    #[must_use]
    pub fn effective_column(&self) -> &'static str {
        effective_column(self.column, self.name)
    }
}

fn effective_column(column: Option<&'static str>, name: &'static str) -> &'static str {
    match column {
        Some(c) if !c.is_empty() => c,
        _ => name,
    }
}

/// Read-only typed view of a field's `Option` slot.
///
/// `Unsupported` marks a field whose declared type is outside the supported
/// set; extraction rejects the whole record when it encounters one.
#[derive(Debug)]
pub enum FieldValue<'a> {
    /// An `Option<String>` field.
    String(&'a Option<String>),
    /// An `Option<i64>` field.
    Integer(&'a Option<i64>),
    /// An `Option<Bytes>` field.
    Binary(&'a Option<Bytes>),
    /// A field whose declared type cannot be mapped. `declared` names the
    /// offending type for error reporting.
    Unsupported {
        /// The declared Rust type, e.g. `"bool"`.
        declared: &'static str,
    },
}

impl FieldValue<'_> {
    /// Returns the declared kind, or `None` for unsupported fields.
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FieldValue::String(_) => Some(ValueKind::String),
            FieldValue::Integer(_) => Some(ValueKind::Integer),
            FieldValue::Binary(_) => Some(ValueKind::Binary),
            FieldValue::Unsupported { .. } => None,
        }
    }
}

/// Writable typed handle for a field's `Option` slot.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    /// An `Option<String>` field.
    String(&'a mut Option<String>),
    /// An `Option<i64>` field.
    Integer(&'a mut Option<i64>),
    /// An `Option<Bytes>` field.
    Binary(&'a mut Option<Bytes>),
    /// A field whose declared type cannot be mapped.
    Unsupported {
        /// The declared Rust type, e.g. `"bool"`.
        declared: &'static str,
    },
}

impl FieldSlot<'_> {
    /// Returns the declared kind, or `None` for unsupported fields.
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FieldSlot::String(_) => Some(ValueKind::String),
            FieldSlot::Integer(_) => Some(ValueKind::Integer),
            FieldSlot::Binary(_) => Some(ValueKind::Binary),
            FieldSlot::Unsupported { .. } => None,
        }
    }
}

/// Declares a record type and generates its [`Record`] impl.
///
/// Each field names one of the three supported kinds (`string`, `i64`,
/// `bytes`) and carries an optional column name and an optional primary-key
/// ordinal in a trailing brace block. The generated struct wraps every
/// field in `Option` and derives `Debug`, `Clone`, `Default`, and
/// `PartialEq`.
///
/// A field without a `column` entry maps to its own field name.
///
/// # Examples
///
/// ```
/// use tablerow::record;
///
/// record! {
///     /// One device registration row.
///     pub struct Device {
///         tenant: string { column: "tenant_id", pk: "1" },
///         serial: string { column: "serial", pk: "2" },
///         firmware: i64 {},
///         pubkey: bytes { column: "public_key" },
///     }
/// }
///
/// let d = Device { serial: Some("abc".into()), ..Device::default() };
/// assert!(d.firmware.is_none());
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $kind:ident {
                    $(column: $column:literal)? $(,)?
                    $(pk: $pk:literal)? $(,)?
                }
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $crate::record!(@ty $kind),
            )*
        }

        impl $crate::Record for $name {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field {
                            name: ::core::stringify!($field),
                            column: $crate::record!(@opt $($column)?),
                            pk_ordinal: $crate::record!(@opt $($pk)?),
                            value: $crate::record!(@read $kind, &self.$field),
                        },
                    )*
                ]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<$crate::FieldMut<'_>> {
                ::std::vec![
                    $(
                        $crate::FieldMut {
                            name: ::core::stringify!($field),
                            column: $crate::record!(@opt $($column)?),
                            pk_ordinal: $crate::record!(@opt $($pk)?),
                            slot: $crate::record!(@write $kind, &mut self.$field),
                        },
                    )*
                ]
            }
        }
    };

    // Field slot types per declared kind.
    (@ty string) => { ::std::option::Option<::std::string::String> };
    (@ty i64) => { ::std::option::Option<i64> };
    (@ty bytes) => { ::std::option::Option<$crate::Bytes> };

    // Optional string metadata -> Option<&'static str>.
    (@opt) => { ::core::option::Option::None };
    (@opt $v:literal) => { ::core::option::Option::Some($v) };

    // Read views.
    (@read string, $f:expr) => { $crate::FieldValue::String($f) };
    (@read i64, $f:expr) => { $crate::FieldValue::Integer($f) };
    (@read bytes, $f:expr) => { $crate::FieldValue::Binary($f) };

    // Write views.
    (@write string, $f:expr) => { $crate::FieldSlot::String($f) };
    (@write i64, $f:expr) => { $crate::FieldSlot::Integer($f) };
    (@write bytes, $f:expr) => { $crate::FieldSlot::Binary($f) };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    crate::record! {
        /// Test record exercising every metadata combination.
        struct Sample {
            tenant: string { column: "tenant_id", pk: "1" },
            seq: i64 { pk: "2" },
            label: string { column: "label" },
            payload: bytes {},
        }
    }

    #[test]
    fn test_generated_metadata_in_declaration_order() {
        let s = Sample::default();
        let fields = s.fields();
        assert_eq!(fields.len(), 4);

        assert_eq!(fields[0].name, "tenant");
        assert_eq!(fields[0].column, Some("tenant_id"));
        assert_eq!(fields[0].pk_ordinal, Some("1"));

        assert_eq!(fields[1].name, "seq");
        assert_eq!(fields[1].column, None);
        assert_eq!(fields[1].pk_ordinal, Some("2"));

        assert_eq!(fields[2].pk_ordinal, None);
        assert_eq!(fields[3].column, None);
    }

    #[test]
    fn test_effective_column_defaults_to_field_name() {
        let s = Sample::default();
        let fields = s.fields();
        assert_eq!(fields[0].effective_column(), "tenant_id");
        assert_eq!(fields[1].effective_column(), "seq");
        assert_eq!(fields[3].effective_column(), "payload");
    }

    #[test]
    fn test_empty_column_falls_back_to_field_name() {
        let field = Field {
            name: "x",
            column: Some(""),
            pk_ordinal: None,
            value: FieldValue::Integer(&None),
        };
        assert_eq!(field.effective_column(), "x");
    }

    #[test]
    fn test_field_kinds() {
        let mut s = Sample::default();
        let kinds: Vec<_> = s.fields().iter().map(|f| f.value.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Some(ValueKind::String),
                Some(ValueKind::Integer),
                Some(ValueKind::String),
                Some(ValueKind::Binary),
            ]
        );
        let slot_kinds: Vec<_> = s.fields_mut().iter().map(|f| f.slot.kind()).collect();
        assert_eq!(slot_kinds.len(), 4);
        assert_eq!(slot_kinds[3], Some(ValueKind::Binary));
    }

    #[test]
    fn test_slot_writes_through() {
        let mut s = Sample::default();
        for field in s.fields_mut() {
            if let FieldSlot::Integer(slot) = field.slot {
                *slot = Some(9);
            }
        }
        assert_eq!(s.seq, Some(9));
    }

    #[test]
    fn test_unsupported_kind_is_none() {
        let value = FieldValue::Unsupported { declared: "bool" };
        assert_eq!(value.kind(), None);
    }
}
