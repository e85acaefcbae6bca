//! Table-store trait definition.
//!
//! This module defines [`TableStore`], the seam between the mapping engine
//! and whatever actually holds the rows. The trait speaks entirely in
//! [`RowData`]/[`KeyValue`] terms; it knows nothing about record types.
//!
//! # Design Philosophy
//!
//! - **Rows, not bytes**: the unit of exchange is a primary-key tuple plus named attribute
//!   columns, matching the wire model of wide-column stores.
//! - **Positional row identity**: two operations address the same row exactly when their
//!   primary-key tuples compare equal position by position.
//! - **Async by default**: implementations are expected to cross a network.
//!
//! Record-aware logic (extraction, materialization, parameter defaulting)
//! lives in [`Table`](crate::Table), not in store implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tablerow::{KeyValue, RowData};

use crate::error::StoreResult;

/// Row-existence expectation attached to a write operation.
///
/// Condition failures surface as [`StoreError::Conflict`](crate::StoreError).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowExistence {
    /// Apply the write regardless of whether the row exists.
    #[default]
    Ignore,
    /// Fail unless the row already exists.
    ExpectExist,
    /// Fail if the row already exists.
    ExpectNotExist,
}

/// Column changes applied by an update operation.
///
/// Deletions apply before puts; when the same name appears twice in `put`,
/// the later entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowUpdate {
    /// Column names to remove from the row.
    pub delete: Vec<String>,

    /// Columns to write or overwrite.
    pub put: Vec<KeyValue>,
}

/// Abstract store for row-level operations.
///
/// Implementations must be thread-safe (`Send + Sync`) and support
/// concurrent operations. The crate ships [`MemoryTableStore`](crate::MemoryTableStore)
/// as a reference implementation for tests and development; production
/// implementations wrap a remote table-store client.
///
/// # Example
///
/// ```
/// use tablerow::{KeyValue, RowData};
/// use tablerow_store::{MemoryTableStore, RowExistence, TableStore};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let store = MemoryTableStore::new();
/// let row = RowData {
///     primary_key: vec![KeyValue::new("id", "r1")],
///     columns: vec![KeyValue::new("name", "Alice")],
/// };
/// store.put_row("users", row.clone(), RowExistence::Ignore).await.unwrap();
///
/// let fetched = store.get_row("users", row.primary_key.clone()).await.unwrap();
/// assert_eq!(fetched, Some(row));
/// # });
/// ```
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Writes a full row, replacing any existing row with the same
    /// primary-key tuple.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`](crate::StoreError) if `condition` is violated.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn put_row(
        &self,
        table: &str,
        row: RowData,
        condition: RowExistence,
    ) -> StoreResult<()>;

    /// Applies column-level changes to the row identified by `primary_key`.
    ///
    /// With [`RowExistence::Ignore`], a missing row is created (upsert).
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`](crate::StoreError) if `condition` is violated.
    #[must_use = "store operations may fail and errors must be handled"]
    async fn update_row(
        &self,
        table: &str,
        primary_key: Vec<KeyValue>,
        update: RowUpdate,
        condition: RowExistence,
    ) -> StoreResult<()>;

    /// Retrieves the row identified by `primary_key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(row))` if the row exists
    /// - `Ok(None)` if it doesn't
    /// - `Err(...)` on store errors
    #[must_use = "store operations may fail and errors must be handled"]
    async fn get_row(&self, table: &str, primary_key: Vec<KeyValue>)
        -> StoreResult<Option<RowData>>;
}
