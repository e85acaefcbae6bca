//! In-memory table-store implementation.
//!
//! This module provides [`MemoryTableStore`], an in-memory implementation
//! of [`TableStore`] suitable for testing and development.
//!
//! # Features
//!
//! - **Thread-safe**: uses [`parking_lot::RwLock`] for concurrent access
//! - **Positional row identity**: rows are keyed by their full primary-key tuple, compared
//!   position by position
//! - **Existence conditions**: honors [`RowExistence`] exactly as a remote store would
//!
//! # Limitations
//!
//! - Data is not persisted; all rows are lost when the process exits
//! - No replication, versioning, or TTL

use std::{
    collections::BTreeMap,
    sync::Arc,
};

use async_trait::async_trait;
use parking_lot::RwLock;
use tablerow::{KeyValue, RowData, Value};

use crate::{
    error::{StoreError, StoreResult},
    store::{RowExistence, RowUpdate, TableStore},
};

/// Attribute columns of one stored row, keyed by column name.
type StoredColumns = BTreeMap<String, Value>;

/// Rows of one table, keyed by the primary-key tuple.
type StoredTable = BTreeMap<Vec<KeyValue>, StoredColumns>;

/// In-memory [`TableStore`] backed by nested [`BTreeMap`]s.
///
/// Primarily intended for testing, but usable wherever persistence is not
/// required. Tables are created implicitly on first write.
///
/// # Cloning
///
/// `MemoryTableStore` is cheaply cloneable via [`Arc`]. All clones share
/// the same underlying data.
#[derive(Clone, Default)]
pub struct MemoryTableStore {
    tables: Arc<RwLock<BTreeMap<String, StoredTable>>>,
}

impl MemoryTableStore {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows currently stored in `table`.
    ///
    /// A table that has never been written counts as empty.
    #[must_use]
    pub fn row_count(&self, table: &str) -> usize {
        self.tables.read().get(table).map_or(0, BTreeMap::len)
    }
}

impl std::fmt::Debug for MemoryTableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("MemoryTableStore").field("tables", &tables.len()).finish_non_exhaustive()
    }
}

/// Verifies a row-existence condition against the current state.
fn check_condition(exists: bool, condition: RowExistence) -> StoreResult<()> {
    match condition {
        RowExistence::Ignore => Ok(()),
        RowExistence::ExpectExist if exists => Ok(()),
        RowExistence::ExpectNotExist if !exists => Ok(()),
        _ => Err(StoreError::conflict()),
    }
}

/// Converts stored columns back into wire-level pairs.
fn to_pairs(columns: &StoredColumns) -> Vec<KeyValue> {
    columns.iter().map(|(name, value)| KeyValue { name: name.clone(), value: value.clone() }).collect()
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn put_row(
        &self,
        table: &str,
        row: RowData,
        condition: RowExistence,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_owned()).or_default();

        check_condition(rows.contains_key(&row.primary_key), condition)?;

        let mut columns = StoredColumns::new();
        for kv in row.columns {
            columns.insert(kv.name, kv.value);
        }
        rows.insert(row.primary_key, columns);
        Ok(())
    }

    async fn update_row(
        &self,
        table: &str,
        primary_key: Vec<KeyValue>,
        update: RowUpdate,
        condition: RowExistence,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_owned()).or_default();

        check_condition(rows.contains_key(&primary_key), condition)?;

        // With Ignore, an update to a missing row creates it.
        let columns = rows.entry(primary_key).or_default();
        for name in &update.delete {
            columns.remove(name);
        }
        for kv in update.put {
            columns.insert(kv.name, kv.value);
        }
        Ok(())
    }

    async fn get_row(
        &self,
        table: &str,
        primary_key: Vec<KeyValue>,
    ) -> StoreResult<Option<RowData>> {
        let tables = self.tables.read();
        let row = tables.get(table).and_then(|rows| rows.get(&primary_key));
        Ok(row.map(|columns| RowData { columns: to_pairs(columns), primary_key }))
    }
}
