// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sealstore.toml` > `~/.config/sealstore/sealstore.toml`
//! > `/etc/sealstore/sealstore.toml` with environment variable overrides via
//! the `SEALSTORE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SealstoreConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/sealstore/sealstore.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "sealstore.toml";

/// Per-user config file under the XDG config directory, if one can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sealstore").join("sealstore.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sealstore/sealstore.toml` (system-wide)
/// 3. `~/.config/sealstore/sealstore.toml` (user XDG config)
/// 4. `./sealstore.toml` (local directory)
/// 5. `SEALSTORE_*` environment variables
pub fn load_config() -> Result<SealstoreConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SealstoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SealstoreConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SealstoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SealstoreConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SealstoreConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// `Env::split("_")` would turn `SEALSTORE_STORAGE_DATABASE_PATH` into
/// `storage.database.path`; only the first underscore after a known section
/// name becomes a dot. `SEALSTORE_PASSPHRASE` is a build-time input and is
/// never read as configuration.
fn env_provider() -> Env {
    Env::prefixed("SEALSTORE_").ignore(&["passphrase"]).map(|key| {
        let mapped = key
            .as_str()
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1)
            .replacen("migration_", "migration.", 1);
        mapped.into()
    })
}
