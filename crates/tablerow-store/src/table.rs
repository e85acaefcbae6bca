//! Record-level row operations over a [`TableStore`].
//!
//! [`Table`] is the piece that wires the mapping engine to a store: it
//! extracts rows from records on the way out and materializes fetched rows
//! back into records on the way in. It holds no state besides the store
//! handle and the table name; every call derives its row image fresh from
//! the record it is given.

use std::sync::Arc;

use tablerow::{extract, materialize, KeyValue, Record};
use tracing::debug;

use crate::{
    error::{StoreError, StoreResult},
    store::{RowExistence, RowUpdate, TableStore},
};

/// Options for [`Table::put_row`].
#[derive(Debug, Clone)]
pub struct PutRowParams {
    /// Row-existence condition. Defaults to [`RowExistence::ExpectNotExist`]:
    /// a put is an insert unless the caller opts into overwriting.
    pub condition: RowExistence,
}

impl Default for PutRowParams {
    fn default() -> Self {
        Self { condition: RowExistence::ExpectNotExist }
    }
}

/// Options for [`Table::update_row`].
#[derive(Debug, Clone, Default)]
pub struct UpdateRowParams {
    /// Row-existence condition. Defaults to [`RowExistence::Ignore`]
    /// (upsert).
    pub condition: RowExistence,

    /// Column names to delete from the row.
    pub deleted_columns: Vec<String>,

    /// Extra columns to write, in addition to the record's own attribute
    /// columns. The record's columns win on a name collision.
    pub updated_columns: Vec<KeyValue>,
}

/// Row operations for one table, bound to a [`TableStore`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tablerow::record;
/// use tablerow_store::{MemoryTableStore, PutRowParams, Table};
///
/// record! {
///     struct User {
///         id: string { column: "user_id", pk: "1" },
///         name: string { column: "name" },
///     }
/// }
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let table = Table::new(Arc::new(MemoryTableStore::new()), "users").unwrap();
///
/// let user = User { id: Some("u1".into()), name: Some("Alice".into()) };
/// table.put_row(&user, PutRowParams::default()).await.unwrap();
///
/// // Key-only record: unset fields extract to nothing, so this is a lookup.
/// let mut fetched = User { id: Some("u1".into()), name: None };
/// assert!(table.get_row(&mut fetched).await.unwrap());
/// assert_eq!(fetched.name.as_deref(), Some("Alice"));
/// # });
/// ```
#[derive(Clone)]
pub struct Table {
    store: Arc<dyn TableStore>,
    name: String,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Table {
    /// Binds row operations for `name` to the given store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if `name` is empty.
    pub fn new(store: Arc<dyn TableStore>, name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::config("table name cannot be empty"));
        }
        Ok(Self { store, name })
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a row built from the record's set fields.
    ///
    /// Fields carrying a primary-key ordinal become the key tuple; the
    /// remaining set fields become attribute columns. By default the put
    /// expects the row not to exist.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Mapping`] if the record cannot be extracted.
    /// - [`StoreError::Conflict`] if the existence condition is violated.
    #[tracing::instrument(skip_all, fields(table = %self.name))]
    pub async fn put_row<R: Record>(&self, record: &R, params: PutRowParams) -> StoreResult<()> {
        let row = extract(record)?;
        debug!(
            pk_len = row.primary_key.len(),
            columns = row.columns.len(),
            condition = ?params.condition,
            "putting row"
        );
        self.store.put_row(&self.name, row, params.condition).await
    }

    /// Updates the row identified by the record's primary-key fields.
    ///
    /// Changes apply in order: `deleted_columns` are removed, then
    /// `updated_columns` are written, then the record's own attribute
    /// columns. By default a missing row is created (upsert).
    ///
    /// # Errors
    ///
    /// - [`StoreError::Mapping`] if the record cannot be extracted.
    /// - [`StoreError::Conflict`] if the existence condition is violated.
    #[tracing::instrument(skip_all, fields(table = %self.name))]
    pub async fn update_row<R: Record>(
        &self,
        record: &R,
        params: UpdateRowParams,
    ) -> StoreResult<()> {
        let row = extract(record)?;

        let mut put = params.updated_columns;
        put.extend(row.columns);
        let update = RowUpdate { delete: params.deleted_columns, put };

        debug!(
            pk_len = row.primary_key.len(),
            puts = update.put.len(),
            deletes = update.delete.len(),
            condition = ?params.condition,
            "updating row"
        );
        self.store.update_row(&self.name, row.primary_key, update, params.condition).await
    }

    /// Fetches the row identified by the record's primary-key fields and
    /// materializes it back into the record.
    ///
    /// Only fields carrying a primary-key ordinal need to be set on entry;
    /// attribute fields are populated from the fetched row. Returns
    /// `Ok(false)` and leaves the record untouched when no row matches.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Mapping`] if extraction of the key or materialization of the result fails
    ///   (fields assigned before a materialization failure keep their new values).
    #[tracing::instrument(skip_all, fields(table = %self.name))]
    pub async fn get_row<R: Record>(&self, record: &mut R) -> StoreResult<bool> {
        let row = extract(record)?;
        let Some(fetched) = self.store.get_row(&self.name, row.primary_key).await? else {
            debug!("row not found");
            return Ok(false);
        };

        debug!(columns = fetched.columns.len(), "materializing fetched row");
        materialize(record, &fetched.primary_key, &fetched.columns)?;
        Ok(true)
    }
}
