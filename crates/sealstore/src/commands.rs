// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations. Each returns the text to print on stdout.

use sealstore_config::SealstoreConfig;
use sealstore_core::{KeyValueStore, SealstoreError};
use sealstore_vault::{MigrationReport, SecretValue, SecureRecord, SecureStorage, mask_secret};
use thiserror::Error;
use tracing::{info, warn};

use crate::Commands;

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Sealstore(#[from] SealstoreError),

    #[error("no value stored under `{0}`")]
    NotFound(String),

    #[error("value is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// Open the configured store and execute `command` against it.
pub(crate) async fn run(command: Commands, config: &SealstoreConfig) -> Result<String, CommandError> {
    let store = sealstore_storage::open_store(&config.storage)?;
    let storage = SecureStorage::with_embedded_passphrase(store);

    if config.migration.on_startup {
        let report = storage.migrate_keys(&config.migration.keys).await;
        if !report.is_clean() {
            warn!(warnings = report.warnings.len(), "startup migration finished with warnings");
        }
    }

    execute(&storage, command).await
}

pub(crate) async fn execute<S>(storage: &SecureStorage<S>, command: Commands) -> Result<String, CommandError>
where
    S: KeyValueStore + ?Sized,
{
    match command {
        Commands::Get { key, reveal } => {
            let value = storage
                .read_secure(&key)
                .await?
                .ok_or_else(|| CommandError::NotFound(key.clone()))?;
            render_value(&value, reveal)
        }
        Commands::Set { key, value, json } => {
            if json {
                let parsed: serde_json::Value =
                    serde_json::from_str(&value).map_err(CommandError::InvalidJson)?;
                storage.write_secure(&key, parsed).await?;
            } else {
                storage.write_secure(&key, value).await?;
            }
            info!(key = %key, "value stored");
            Ok(format!("stored `{key}`"))
        }
        Commands::Remove { key } => {
            storage.remove_secure(&key)?;
            Ok(format!("removed `{key}`"))
        }
        Commands::List => list(storage),
        Commands::Migrate { keys } => {
            let report = if keys.is_empty() {
                storage.migrate_all().await?
            } else {
                storage.migrate_keys(&keys).await
            };
            Ok(render_report(&report))
        }
    }
}

fn render_value(value: &SecretValue, reveal: bool) -> Result<String, CommandError> {
    let text = match (value.as_str(), value.as_json()) {
        (Some(s), _) => s.to_string(),
        (None, Some(v)) if reveal => {
            serde_json::to_string_pretty(v).map_err(SealstoreError::from)?
        }
        _ => value.to_plaintext()?,
    };
    Ok(if reveal { text } else { mask_secret(&text) })
}

/// Keys with their storage state. Values are not decrypted.
fn list<S: KeyValueStore + ?Sized>(storage: &SecureStorage<S>) -> Result<String, CommandError> {
    let mut lines = Vec::new();
    for key in storage.keys()? {
        let state = match storage.store().get(&key)? {
            Some(raw) if SecureRecord::is_well_formed(&raw) => "encrypted",
            Some(_) => "plaintext",
            None => continue,
        };
        lines.push(format!("{key}\t{state}"));
    }
    Ok(lines.join("\n"))
}

fn render_report(report: &MigrationReport) -> String {
    let mut out = format!(
        "migrated: {}, already encrypted: {}, missing: {}",
        report.migrated.len(),
        report.skipped.len(),
        report.missing.len()
    );
    for key in &report.migrated {
        out.push_str(&format!("\n  migrated {key}"));
    }
    for warning in &report.warnings {
        out.push_str(&format!("\n  warning: {warning}"));
    }
    out
}
