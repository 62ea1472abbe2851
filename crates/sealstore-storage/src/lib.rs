// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key-value store backends for sealstore.
//!
//! Stores hold opaque strings. Encryption happens one layer up, in
//! `sealstore-vault`; nothing here ever sees a plaintext credential unless a
//! legacy build wrote one.

pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::sync::Arc;

use sealstore_config::model::StorageConfig;
use sealstore_core::{KeyValueStore, SealstoreError, StoreBackend};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Open the backend selected by `config`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, SealstoreError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(&config.database_path, config.wal_mode)?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::debug!(backend = %config.backend, "key-value store ready");
    Ok(store)
}
