// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend selection from configuration.

use sealstore_config::model::StorageConfig;
use sealstore_core::{KeyValueStore, StoreBackend};
use sealstore_storage::open_store;

#[test]
fn sqlite_backend_persists_to_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("sealstore.db");
    let config = StorageConfig {
        backend: StoreBackend::Sqlite,
        database_path: path.display().to_string(),
        wal_mode: true,
    };

    let store = open_store(&config).unwrap();
    store.set("connection", "raw").unwrap();
    drop(store);

    assert!(path.exists());
    let store = open_store(&config).unwrap();
    assert_eq!(store.get("connection").unwrap().as_deref(), Some("raw"));
}

#[test]
fn memory_backend_starts_empty() {
    let config = StorageConfig {
        backend: StoreBackend::Memory,
        database_path: String::new(),
        wal_mode: false,
    };

    let store = open_store(&config).unwrap();
    assert!(store.keys().unwrap().is_empty());
    store.set("k", "v").unwrap();
    assert_eq!(store.keys().unwrap(), vec!["k"]);
}
