// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end behaviour of the secure storage adapter over real backends.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sealstore_core::{KeyValueStore, SealstoreError};
use sealstore_storage::{MemoryStore, SqliteStore};
use sealstore_vault::{
    DecryptError, Passphrase, SecretValue, SecureStorage, decrypt_value, encrypt_value,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn memory_storage() -> SecureStorage<MemoryStore> {
    SecureStorage::new(Arc::new(MemoryStore::new()), Passphrase::new("integration"))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Connection {
    host: String,
    port: u16,
}

#[tokio::test]
async fn structured_value_end_to_end() {
    let storage = memory_storage();
    let conn = Connection {
        host: "h".into(),
        port: 8108,
    };
    storage.write_secure_json("connection", &conn).await.unwrap();

    let stored = storage.store().get("connection").unwrap().unwrap();
    let segments: Vec<&str> = stored.split('.').collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(STANDARD.decode(segments[0]).unwrap().len(), 16);
    assert_eq!(STANDARD.decode(segments[1]).unwrap().len(), 12);
    assert!(STANDARD.decode(segments[2]).unwrap().len() >= 16);

    assert_eq!(
        storage.read_secure("connection").await.unwrap(),
        Some(SecretValue::Structured(json!({"host": "h", "port": 8108})))
    );
    let typed: Option<Connection> = storage.read_secure_as("connection").await.unwrap();
    assert_eq!(typed, Some(conn));
}

#[tokio::test]
async fn legacy_json_is_returned_and_upgraded() {
    let storage = SecureStorage::new(
        Arc::new(MemoryStore::with_entries([("k", "{\"a\":1}")])),
        Passphrase::new("integration"),
    );

    let first = storage.read_secure("k").await.unwrap();
    assert_eq!(first, Some(SecretValue::Structured(json!({"a": 1}))));

    let stored = storage.store().get("k").unwrap().unwrap();
    assert_ne!(stored, "{\"a\":1}");
    assert_eq!(stored.split('.').count(), 3);

    let second = storage.read_secure("k").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(storage.store().get("k").unwrap().unwrap(), stored);
}

#[tokio::test]
async fn legacy_bare_string_is_returned_and_upgraded() {
    let storage = SecureStorage::new(
        Arc::new(MemoryStore::with_entries([("host", "localhost:8108")])),
        Passphrase::new("integration"),
    );

    assert_eq!(
        storage.read_secure("host").await.unwrap(),
        Some(SecretValue::Raw("localhost:8108".into()))
    );
    let stored = storage.store().get("host").unwrap().unwrap();
    assert_eq!(
        decrypt_value(&Passphrase::new("integration"), &stored).unwrap(),
        "localhost:8108"
    );
}

#[tokio::test]
async fn malformed_segment_counts_fall_back_to_plaintext() {
    for raw in ["", "one", "one.two", "a.b.c.d", "a.b.c.d.e.f"] {
        let storage = SecureStorage::new(
            Arc::new(MemoryStore::with_entries([("k", raw)])),
            Passphrase::new("integration"),
        );
        let value = storage.read_secure("k").await.unwrap();
        assert_eq!(value, Some(SecretValue::Raw(raw.to_string())), "{raw:?}");
    }
}

#[tokio::test]
async fn record_under_foreign_key_is_treated_as_plaintext() {
    let foreign = encrypt_value(&Passphrase::new("someone-else"), "secret").unwrap();
    let storage = SecureStorage::new(
        Arc::new(MemoryStore::with_entries([("k", foreign.as_str())])),
        Passphrase::new("integration"),
    );

    assert_eq!(
        decrypt_value(&Passphrase::new("integration"), &foreign),
        Err(DecryptError::Authentication)
    );
    assert_eq!(
        storage.read_secure("k").await.unwrap(),
        Some(SecretValue::Raw(foreign.clone()))
    );
    assert_ne!(storage.store().get("k").unwrap().unwrap(), foreign);
}

#[tokio::test]
async fn remove_then_read_is_absent() {
    let storage = memory_storage();
    storage.write_secure("k", "v").await.unwrap();
    storage.remove_secure("k").unwrap();
    storage.remove_secure("k").unwrap();
    storage.remove_secure("never-written").unwrap();
    assert_eq!(storage.read_secure("k").await.unwrap(), None);
}

#[tokio::test]
async fn overwrite_replaces_value() {
    let storage = memory_storage();
    storage.write_secure("k", "first").await.unwrap();
    storage.write_secure("k", "second").await.unwrap();
    assert_eq!(
        storage.read_secure("k").await.unwrap(),
        Some(SecretValue::Raw("second".into()))
    );
}

#[tokio::test]
async fn sqlite_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secure.db");

    {
        let storage = SecureStorage::new(
            Arc::new(SqliteStore::open(&path, true).unwrap()),
            Passphrase::new("integration"),
        );
        storage
            .write_secure_json("connection_history", &json!(["a", "b"]))
            .await
            .unwrap();
    }

    let storage = SecureStorage::new(
        Arc::new(SqliteStore::open(&path, true).unwrap()),
        Passphrase::new("integration"),
    );
    assert_eq!(
        storage.read_secure("connection_history").await.unwrap(),
        Some(SecretValue::Structured(json!(["a", "b"])))
    );
}

#[tokio::test]
async fn dyn_store_works_through_trait_object() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let storage = SecureStorage::new(store, Passphrase::new("integration"));
    storage.write_secure("k", "v").await.unwrap();
    assert_eq!(storage.keys().unwrap(), vec!["k"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_to_distinct_keys() {
    let storage = memory_storage();
    let mut handles = Vec::new();
    for i in 0..8 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .write_secure(&format!("key-{i}"), format!("value-{i}"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    for i in 0..8 {
        assert_eq!(
            storage.read_secure(&format!("key-{i}")).await.unwrap(),
            Some(SecretValue::Raw(format!("value-{i}")))
        );
    }
}

/// Serves reads from a seeded map and refuses every write.
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, SealstoreError> {
        self.0.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SealstoreError> {
        Err(SealstoreError::storage(std::io::Error::other("store is read-only")))
    }

    fn remove(&self, key: &str) -> Result<(), SealstoreError> {
        self.0.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, SealstoreError> {
        self.0.keys()
    }
}

fn read_only_storage(entries: &[(&str, &str)]) -> SecureStorage<ReadOnlyStore> {
    SecureStorage::new(
        Arc::new(ReadOnlyStore(MemoryStore::with_entries(
            entries.iter().copied(),
        ))),
        Passphrase::new("integration"),
    )
}

#[tokio::test]
async fn failed_rewrite_still_returns_legacy_value() {
    let storage = read_only_storage(&[("host", "localhost:8108")]);

    assert_eq!(
        storage.read_secure("host").await.unwrap(),
        Some(SecretValue::Raw("localhost:8108".into()))
    );
    assert_eq!(
        storage.store().get("host").unwrap().as_deref(),
        Some("localhost:8108")
    );
}

#[tokio::test]
async fn failed_rewrite_is_a_migration_warning() {
    let storage = read_only_storage(&[("host", "localhost:8108")]);

    let report = storage.migrate_keys(["host", "absent"]).await;

    assert!(report.migrated.is_empty());
    assert_eq!(report.missing, vec!["absent"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("host: "));
    assert!(report.warnings[0].contains("read-only"));
    assert!(!report.is_clean());
}

#[tokio::test]
async fn write_to_failing_store_surfaces_storage_error() {
    let storage = read_only_storage(&[]);
    let err = storage.write_secure("k", "v").await.unwrap_err();
    assert!(matches!(err, SealstoreError::Storage { .. }));
}

#[tokio::test]
async fn quoted_legacy_string_reads_back_raw() {
    let storage = SecureStorage::new(
        Arc::new(MemoryStore::with_entries([("anthropic_api_key", "\"sk-ant-123\"")])),
        Passphrase::new("integration"),
    );

    for _ in 0..2 {
        assert_eq!(
            storage.read_secure("anthropic_api_key").await.unwrap(),
            Some(SecretValue::Raw("sk-ant-123".into()))
        );
    }
    let stored = storage.store().get("anthropic_api_key").unwrap().unwrap();
    assert_eq!(
        decrypt_value(&Passphrase::new("integration"), &stored).unwrap(),
        "sk-ant-123"
    );
}

mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn any_string_round_trips(s in "\\PC{0,64}") {
            let p = Passphrase::new("prop");
            let encoded = encrypt_value(&p, &s).unwrap();
            prop_assert_eq!(decrypt_value(&p, &encoded).unwrap(), s);
        }
    }
}
