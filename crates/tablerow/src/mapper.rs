//! The mapping engine: record extraction and row materialization.
//!
//! [`extract`] walks a record's fields and splits the set values into an
//! ordered primary-key tuple and an attribute set. [`materialize`] performs
//! the reverse: it writes named values returned by a read operation back
//! into the matching fields of a record, with type-checked assignment.
//!
//! Both operations are synchronous, stateless, and side-effect-local. They
//! assume exclusive access to the record for the duration of a single call.

use std::collections::HashMap;

use crate::{
    error::{MapError, MapResult, PairContext},
    record::{FieldSlot, FieldValue, Record},
    value::{KeyValue, RowData, Value},
};

/// Extracts the primary-key tuple and attribute set from a record.
///
/// Fields are visited in declaration order. A field whose value is unset
/// participates in neither list, so partial records (for example, key-only
/// lookups) extract cleanly. Fields carrying a primary-key ordinal land in
/// [`RowData::primary_key`], sorted ascending by ordinal **compared as a
/// raw string** (`"10"` sorts before `"2"`); equal ordinals keep
/// declaration order. All other set fields land in [`RowData::columns`],
/// keyed by column name with last-write-wins on a name collision.
///
/// A field without a declared column name maps to its own field name.
///
/// Empty output for a fully-unset record is valid, not an error.
///
/// # Errors
///
/// Returns [`MapError::InvalidFieldType`] if any field's declared type is
/// outside the supported set, whether or not that field is set. The check
/// aborts the whole extraction before producing any output.
///
/// # Examples
///
/// ```
/// use tablerow::{extract, record};
///
/// record! {
///     struct Item {
///         id: string { column: "item_id", pk: "1" },
///         qty: i64 {},
///     }
/// }
///
/// let item = Item { id: Some("a1".into()), qty: None };
/// let row = extract(&item)?;
/// assert_eq!(row.primary_key[0].name, "item_id");
/// assert!(row.columns.is_empty());
/// # Ok::<(), tablerow::MapError>(())
/// ```
pub fn extract<R: Record>(record: &R) -> MapResult<RowData> {
    let mut keyed: Vec<(&'static str, KeyValue)> = Vec::new();
    let mut columns: Vec<KeyValue> = Vec::new();

    for field in record.fields() {
        let value = match field.value {
            FieldValue::String(v) => v.clone().map(Value::String),
            FieldValue::Integer(v) => v.map(Value::Integer),
            FieldValue::Binary(v) => v.clone().map(Value::Binary),
            FieldValue::Unsupported { declared } => {
                return Err(MapError::invalid_field_type(field.name, declared));
            },
        };

        // Unset fields participate in neither the key tuple nor the columns.
        let Some(value) = value else { continue };

        let column = field.effective_column();
        match field.pk_ordinal {
            Some(ordinal) => keyed.push((ordinal, KeyValue::new(column, value))),
            None => match columns.iter_mut().find(|kv| kv.name == column) {
                Some(existing) => existing.value = value,
                None => columns.push(KeyValue::new(column, value)),
            },
        }
    }

    // Raw string comparison, preserved for wire compatibility: "10" < "2".
    keyed.sort_by(|a, b| a.0.cmp(b.0));

    let primary_key = keyed.into_iter().map(|(_, kv)| kv).collect();
    Ok(RowData { primary_key, columns })
}

/// Writes retrieved row data back into a record's fields.
///
/// Builds a lookup from effective column name to field, then assigns every
/// primary-key pair followed by every attribute pair whose name matches a
/// field. Assignment is type-checked against the field's declared kind. A
/// pair whose name matches no field is silently ignored, so unknown columns
/// returned by an evolved schema do not error.
///
/// Processing stops at the first error; fields assigned before the failure
/// keep their new values. No rollback is performed; callers that need an
/// intact record on failure should materialize into a scratch copy.
///
/// # Errors
///
/// - [`MapError::TypeMismatch`] if a value's runtime kind does not match the target field's
///   declared kind. The message identifies the pair as `primary key <name>` or `column <name>`.
/// - [`MapError::InvalidFieldType`] if a pair names a field whose declared type is outside the
///   supported set.
pub fn materialize<R: Record>(
    record: &mut R,
    primary_key: &[KeyValue],
    columns: &[KeyValue],
) -> MapResult<()> {
    let mut slots: HashMap<&'static str, (&'static str, FieldSlot<'_>)> = HashMap::new();
    for field in record.fields_mut() {
        // Later fields win on a column collision, mirroring extraction.
        slots.insert(field.effective_column(), (field.name, field.slot));
    }

    for pair in primary_key {
        assign(&mut slots, pair, PairContext::PrimaryKey)?;
    }
    for pair in columns {
        assign(&mut slots, pair, PairContext::Column)?;
    }

    Ok(())
}

/// Assigns one pair into its matching field slot, if any.
fn assign(
    slots: &mut HashMap<&'static str, (&'static str, FieldSlot<'_>)>,
    pair: &KeyValue,
    context: PairContext,
) -> MapResult<()> {
    let Some((field_name, slot)) = slots.get_mut(pair.name.as_str()) else {
        // Unknown column: tolerated for forward compatibility.
        return Ok(());
    };

    match (slot, &pair.value) {
        (FieldSlot::String(s), Value::String(v)) => **s = Some(v.clone()),
        (FieldSlot::Integer(s), Value::Integer(v)) => **s = Some(*v),
        (FieldSlot::Binary(s), Value::Binary(v)) => **s = Some(v.clone()),
        (FieldSlot::Unsupported { declared }, _) => {
            return Err(MapError::invalid_field_type(*field_name, *declared));
        },
        (FieldSlot::String(_), v) => {
            return Err(mismatch(context, &pair.name, crate::ValueKind::String, v));
        },
        (FieldSlot::Integer(_), v) => {
            return Err(mismatch(context, &pair.name, crate::ValueKind::Integer, v));
        },
        (FieldSlot::Binary(_), v) => {
            return Err(mismatch(context, &pair.name, crate::ValueKind::Binary, v));
        },
    }

    Ok(())
}

fn mismatch(
    context: PairContext,
    name: &str,
    expected: crate::ValueKind,
    actual: &Value,
) -> MapError {
    MapError::type_mismatch(context, name, expected, actual.kind())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::record::{Field, FieldMut};
    use crate::value::ValueKind;

    crate::record! {
        /// Full-width test record: two key components, three attributes.
        struct Order {
            region: string { column: "region", pk: "1" },
            order_id: i64 { column: "order_id", pk: "2" },
            customer: string { column: "customer" },
            total_cents: i64 {},
            receipt: bytes { column: "receipt" },
        }
    }

    fn full_order() -> Order {
        Order {
            region: Some("eu".into()),
            order_id: Some(1001),
            customer: Some("Alice".into()),
            total_cents: Some(2499),
            receipt: Some(Bytes::from_static(b"\xDE\xAD")),
        }
    }

    #[test]
    fn test_extract_splits_keys_and_columns() {
        let row = extract(&full_order()).expect("extract");

        assert_eq!(row.primary_key.len(), 2);
        assert_eq!(row.primary_key[0], KeyValue::new("region", "eu"));
        assert_eq!(row.primary_key[1], KeyValue::new("order_id", 1001i64));

        assert_eq!(row.columns.len(), 3);
        assert!(row.columns.contains(&KeyValue::new("customer", "Alice")));
        // No column declared: field name is used.
        assert!(row.columns.contains(&KeyValue::new("total_cents", 2499i64)));
    }

    #[test]
    fn test_round_trip_reproduces_record() {
        let original = full_order();
        let row = extract(&original).expect("extract");

        let mut restored = Order::default();
        materialize(&mut restored, &row.primary_key, &row.columns).expect("materialize");

        assert_eq!(restored, original);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let order = full_order();
        let first = extract(&order).expect("extract");
        let second = extract(&order).expect("extract");
        assert_eq!(first, second);
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let keys_only = Order {
            region: Some("us".into()),
            order_id: Some(7),
            ..Order::default()
        };
        let row = extract(&keys_only).expect("extract");
        assert_eq!(row.primary_key.len(), 2);
        assert!(row.columns.is_empty());
    }

    #[test]
    fn test_fully_unset_record_extracts_empty() {
        let row = extract(&Order::default()).expect("extract");
        assert!(row.primary_key.is_empty());
        assert!(row.columns.is_empty());
    }

    crate::record! {
        /// Ordinals chosen to expose lexicographic (not numeric) sorting.
        struct Wide {
            b: string { column: "b", pk: "2" },
            c: string { column: "c", pk: "10" },
            a: string { column: "a", pk: "1" },
        }
    }

    #[test]
    fn test_pk_ordinals_sort_lexicographically() {
        let wide = Wide {
            a: Some("va".into()),
            b: Some("vb".into()),
            c: Some("vc".into()),
        };
        let row = extract(&wide).expect("extract");
        let order: Vec<&str> = row.primary_key.iter().map(|kv| kv.name.as_str()).collect();
        // "1" < "10" < "2" as raw strings.
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_type_mismatch_stops_without_rollback() {
        let mut order = Order::default();
        let pk = vec![KeyValue::new("region", "eu"), KeyValue::new("order_id", 1i64)];
        // "customer" assigns fine; "total_cents" carries the wrong kind.
        let cols = vec![
            KeyValue::new("customer", "Bob"),
            KeyValue::new("total_cents", "not-a-number"),
        ];

        let err = materialize(&mut order, &pk, &cols).expect_err("mismatch");
        match err {
            MapError::TypeMismatch { context, name, expected, actual } => {
                assert_eq!(context, PairContext::Column);
                assert_eq!(name, "total_cents");
                assert_eq!(expected, ValueKind::Integer);
                assert_eq!(actual, ValueKind::String);
            },
            other => panic!("unexpected error: {other:?}"),
        }

        // Pairs processed before the failure keep their assignments.
        assert_eq!(order.region.as_deref(), Some("eu"));
        assert_eq!(order.customer.as_deref(), Some("Bob"));
        assert_eq!(order.total_cents, None);
    }

    #[test]
    fn test_pk_mismatch_is_reported_as_primary_key() {
        let mut order = Order::default();
        let pk = vec![KeyValue::new("order_id", "oops")];
        let err = materialize(&mut order, &pk, &[]).expect_err("mismatch");
        assert!(err.to_string().starts_with("primary key \"order_id\""));
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let mut order = Order::default();
        let cols = vec![
            KeyValue::new("customer", "Cara"),
            KeyValue::new("added_in_v2", 1i64),
        ];
        materialize(&mut order, &[], &cols).expect("materialize");
        assert_eq!(order.customer.as_deref(), Some("Cara"));
    }

    /// Record with a field outside the supported set, as a hand-written
    /// impl would declare it.
    #[derive(Default)]
    struct Flagged {
        id: Option<String>,
        enabled: Option<bool>,
    }

    impl Record for Flagged {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field {
                    name: "id",
                    column: Some("id"),
                    pk_ordinal: Some("1"),
                    value: FieldValue::String(&self.id),
                },
                Field {
                    name: "enabled",
                    column: Some("enabled"),
                    pk_ordinal: None,
                    value: FieldValue::Unsupported { declared: "bool" },
                },
            ]
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            vec![
                FieldMut {
                    name: "id",
                    column: Some("id"),
                    pk_ordinal: Some("1"),
                    slot: FieldSlot::String(&mut self.id),
                },
                FieldMut {
                    name: "enabled",
                    column: Some("enabled"),
                    pk_ordinal: None,
                    slot: FieldSlot::Unsupported { declared: "bool" },
                },
            ]
        }
    }

    #[test]
    fn test_invalid_field_type_rejects_extraction() {
        // The bool field is unset; the declared type alone is the error.
        let flagged = Flagged { id: Some("x".into()), enabled: None };
        let err = extract(&flagged).expect_err("invalid field");
        match err {
            MapError::InvalidFieldType { field, declared } => {
                assert_eq!(field, "enabled");
                assert_eq!(declared, "bool");
            },
            other => panic!("unexpected error: {other:?}"),
        }
        let _ = flagged.enabled;
    }

    #[test]
    fn test_materialize_into_unsupported_field_errors() {
        let mut flagged = Flagged::default();
        let cols = vec![KeyValue::new("enabled", 1i64)];
        let err = materialize(&mut flagged, &[], &cols).expect_err("invalid field");
        assert!(matches!(err, MapError::InvalidFieldType { .. }));
    }

    /// Two fields mapped to the same column: last write wins, undiagnosed.
    struct Shadowed {
        old: Option<i64>,
        new: Option<i64>,
    }

    impl Record for Shadowed {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field {
                    name: "old",
                    column: Some("count"),
                    pk_ordinal: None,
                    value: FieldValue::Integer(&self.old),
                },
                Field {
                    name: "new",
                    column: Some("count"),
                    pk_ordinal: None,
                    value: FieldValue::Integer(&self.new),
                },
            ]
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            vec![
                FieldMut {
                    name: "old",
                    column: Some("count"),
                    pk_ordinal: None,
                    slot: FieldSlot::Integer(&mut self.old),
                },
                FieldMut {
                    name: "new",
                    column: Some("count"),
                    pk_ordinal: None,
                    slot: FieldSlot::Integer(&mut self.new),
                },
            ]
        }
    }

    #[test]
    fn test_column_collision_last_write_wins() {
        let shadowed = Shadowed { old: Some(1), new: Some(2) };
        let row = extract(&shadowed).expect("extract");
        assert_eq!(row.columns, vec![KeyValue::new("count", 2i64)]);
    }
}
