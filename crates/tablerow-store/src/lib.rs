//! Async table-store adapter for [`tablerow`] records.
//!
//! This crate wires the synchronous record/row mapping engine from
//! [`tablerow`] to an asynchronous wide-column store. It defines the store
//! seam, a record-level operations facade, and an in-memory reference
//! implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Application                 │
//! │        (record types via `record!`)         │
//! └──────────────────────┬──────────────────────┘
//!                        │ put_row / update_row / get_row
//! ┌──────────────────────▼──────────────────────┐
//! │                    Table                    │
//! │   extract / materialize + param defaults    │
//! └──────────────────────┬──────────────────────┘
//!                        │ RowData / KeyValue
//! ┌──────────────────────▼──────────────────────┐
//! │              TableStore (trait)             │
//! ├─────────────────────────────────────────────┤
//! │   MemoryTableStore   │   remote clients     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`TableStore`]: the async store trait, speaking rows and key tuples
//! - [`Table`]: record-level operations bound to one table
//! - [`MemoryTableStore`]: thread-safe in-memory store for tests
//! - [`StoreConfig`]: validated connection settings for remote stores
//! - [`StoreError`]: the error taxonomy shared by all implementations
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tablerow::record;
//! use tablerow_store::{MemoryTableStore, PutRowParams, Table};
//!
//! record! {
//!     struct Device {
//!         serial: string { column: "serial", pk: "1" },
//!         owner: string { column: "owner" },
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let table = Table::new(Arc::new(MemoryTableStore::new()), "devices")?;
//!
//! let device = Device { serial: Some("SN-1".into()), owner: Some("ops".into()) };
//! table.put_row(&device, PutRowParams::default()).await?;
//!
//! let mut fetched = Device { serial: Some("SN-1".into()), owner: None };
//! assert!(table.get_row(&mut fetched).await?);
//! assert_eq!(fetched.owner.as_deref(), Some("ops"));
//! # Ok::<(), tablerow_store::StoreError>(())
//! # });
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod store;
pub mod table;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use config::StoreConfig;
pub use error::{BoxError, StoreError, StoreResult};
pub use memory::MemoryTableStore;
pub use store::{RowExistence, RowUpdate, TableStore};
pub use table::{PutRowParams, Table, UpdateRowParams};
