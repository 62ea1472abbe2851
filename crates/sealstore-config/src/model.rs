// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for sealstore.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use sealstore_core::StoreBackend;
use serde::{Deserialize, Serialize};

/// Top-level sealstore configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
///
/// The encryption passphrase is deliberately absent: it is fixed at build
/// time and never read from configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SealstoreConfig {
    /// Durable store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Legacy plaintext migration settings.
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Durable store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Which backend holds the encoded records.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("sealstore").join("sealstore.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("sealstore.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Legacy plaintext migration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationConfig {
    /// Migrate the listed keys eagerly at startup instead of waiting for the
    /// first read of each.
    #[serde(default)]
    pub on_startup: bool,

    /// Credential keys the dashboard is known to persist.
    #[serde(default = "default_migration_keys")]
    pub keys: Vec<String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            on_startup: false,
            keys: default_migration_keys(),
        }
    }
}

fn default_migration_keys() -> Vec<String> {
    [
        "connection",
        "connection_history",
        "openai_api_key",
        "anthropic_api_key",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
