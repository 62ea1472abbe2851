// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed key-value store.
//!
//! One connection, guarded by a mutex, serializes every read and write. Each
//! `set` is a single upsert statement, so a concurrent reader sees either the
//! old value or the new one.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, params};
use sealstore_core::{KeyValueStore, SealstoreError};
use tracing::debug;

use crate::migrations::run_migrations;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable store in a single SQLite file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").field("path", &self.path).finish()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>, wal_mode: bool) -> Result<Self, SealstoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(SealstoreError::storage)?;
        }

        let conn = Connection::open(path).map_err(SealstoreError::storage)?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(SealstoreError::storage)?;
        if wal_mode {
            let mode: String = conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .map_err(SealstoreError::storage)?;
            debug!(journal_mode = %mode, "sqlite journal mode set");
        }

        let store = Self::with_connection(conn, Some(path.to_path_buf()))?;
        debug!(path = %path.display(), "sqlite store opened");
        Ok(store)
    }

    /// Open a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self, SealstoreError> {
        let conn = Connection::open_in_memory().map_err(SealstoreError::storage)?;
        Self::with_connection(conn, None)
    }

    fn with_connection(mut conn: Connection, path: Option<PathBuf>) -> Result<Self, SealstoreError> {
        run_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the backing file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, SealstoreError> {
        self.conn
            .lock()
            .map_err(|_| SealstoreError::Internal("sqlite connection lock poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, SealstoreError> {
        self.conn()?
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(SealstoreError::storage)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SealstoreError> {
        self.conn()?
            .execute(
                "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![key, value],
            )
            .map_err(SealstoreError::storage)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SealstoreError> {
        self.conn()?
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
            .map_err(SealstoreError::storage)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, SealstoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key FROM kv_entries ORDER BY key")
            .map_err(SealstoreError::storage)?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(SealstoreError::storage)?;
        rows.collect::<Result<Vec<String>, _>>()
            .map_err(SealstoreError::storage)
    }
}
