//! Shared test utilities for table-store testing.
//!
//! This module provides a canonical record fixture, populated-store
//! helpers, and assertion macros for [`StoreResult`] values. It is
//! feature-gated behind `testutil` to prevent leaking into production
//! builds.
//!
//! # Usage
//!
//! In integration tests, enable the feature in `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tablerow-store = { path = "../tablerow-store", features = ["testutil"] }
//! ```

use std::sync::Arc;

use tablerow::{record, Bytes};

use crate::{
    error::{StoreError, StoreResult},
    memory::MemoryTableStore,
    store::RowExistence,
    table::{PutRowParams, Table},
};

record! {
    /// Canonical fixture row: composite primary key plus one attribute of
    /// each supported kind.
    pub struct FixtureRow {
        /// First primary-key component.
        tenant: string { column: "tenant", pk: "1" },
        /// Second primary-key component.
        id: i64 { column: "id", pk: "2" },
        /// String attribute.
        name: string { column: "name" },
        /// Binary attribute.
        blob: bytes { column: "blob" },
    }
}

/// Creates a fully-populated fixture row for the given id.
#[must_use]
pub fn fixture_row(id: i64) -> FixtureRow {
    FixtureRow {
        tenant: Some("tenant-a".to_owned()),
        id: Some(id),
        name: Some(format!("row-{id:04}")),
        blob: Some(Bytes::from(vec![0xAB; 8])),
    }
}

/// Creates a key-only fixture row for the given id, suitable for lookups.
#[must_use]
pub fn key_row(id: i64) -> FixtureRow {
    FixtureRow { tenant: Some("tenant-a".to_owned()), id: Some(id), ..FixtureRow::default() }
}

/// Creates a [`Table`] over a fresh [`MemoryTableStore`] pre-populated
/// with `count` fixture rows (ids `0..count`).
///
/// # Panics
///
/// Panics if any put fails (should not happen with `MemoryTableStore`).
pub async fn populated_table(name: &str, count: i64) -> (MemoryTableStore, Table) {
    let store = MemoryTableStore::new();
    let table = Table::new(Arc::new(store.clone()), name).expect("valid table name");
    for id in 0..count {
        table
            .put_row(&fixture_row(id), PutRowParams { condition: RowExistence::Ignore })
            .await
            .expect("populate put failed");
    }
    (store, table)
}

/// Assert that a [`StoreResult`] is a [`StoreError::Conflict`].
#[macro_export]
macro_rules! assert_conflict {
    ($result:expr) => {
        assert!(
            matches!(&$result, Err($crate::StoreError::Conflict)),
            "expected StoreError::Conflict, got: {:?}",
            $result,
        );
    };
    ($result:expr, $msg:expr) => {
        assert!(
            matches!(&$result, Err($crate::StoreError::Conflict)),
            "{}: expected StoreError::Conflict, got: {:?}",
            $msg,
            $result,
        );
    };
}

/// Assert that a [`StoreResult`] is a [`StoreError::Mapping`].
#[macro_export]
macro_rules! assert_mapping_err {
    ($result:expr) => {
        assert!(
            matches!(&$result, Err($crate::StoreError::Mapping(_))),
            "expected StoreError::Mapping, got: {:?}",
            $result,
        );
    };
}

/// Helper to verify that a result is a `Conflict` error.
pub fn is_conflict<T>(result: &StoreResult<T>) -> bool {
    matches!(result, Err(StoreError::Conflict))
}

/// Helper to verify that a result is a `Mapping` error.
pub fn is_mapping_err<T>(result: &StoreResult<T>) -> bool {
    matches!(result, Err(StoreError::Mapping(_)))
}
