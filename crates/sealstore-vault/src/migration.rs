// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upgrading values stored before encryption was introduced.
//!
//! [`SecureStorage::read_secure`] migrates lazily, one key at a time.
//! [`SecureStorage::migrate_keys`] and [`SecureStorage::migrate_all`] do the
//! same thing eagerly for a batch of keys and report what happened.

use sealstore_core::{KeyValueStore, SealstoreError};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::DecryptError;
use crate::storage::SecureStorage;
use crate::value::SecretValue;

/// Outcome of an eager migration pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Keys whose legacy plaintext was re-encrypted.
    pub migrated: Vec<String>,
    /// Keys that already held a valid encrypted record.
    pub skipped: Vec<String>,
    /// Keys not present in the store.
    pub missing: Vec<String>,
    /// Non-fatal problems, one per affected key.
    pub warnings: Vec<String>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Interpret a stored string that did not decrypt.
///
/// JSON text is parsed and then treated like a written value, so a quoted
/// JSON string (`"sk-123"`) becomes `Raw("sk-123")` rather than a structured
/// string. Anything that does not parse is kept verbatim as `Raw`.
pub fn classify_legacy(raw: String) -> SecretValue {
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => SecretValue::from(value),
        Err(_) => SecretValue::Raw(raw),
    }
}

impl<S: KeyValueStore + ?Sized> SecureStorage<S> {
    /// Classify `raw` and rewrite it encrypted. Always yields the value.
    pub(crate) async fn recover_legacy(
        &self,
        key: &str,
        raw: String,
        cause: &DecryptError,
    ) -> SecretValue {
        let value = classify_legacy(raw);
        match cause {
            DecryptError::Unavailable(reason) => {
                warn!(key = %key, reason = %reason, "decryption unavailable; returning stored value as-is");
                return value;
            }
            DecryptError::Authentication => {
                warn!(key = %key, "stored record failed authentication; treating it as plaintext");
            }
            DecryptError::Encoding(_) => {}
        }

        match self.reencrypt(key, &value).await {
            Ok(()) => info!(key = %key, kind = value.kind(), "migrated legacy value to encrypted storage"),
            Err(e) => warn!(key = %key, error = %e, "legacy value kept as plaintext; re-encryption failed"),
        }
        value
    }

    async fn reencrypt(&self, key: &str, value: &SecretValue) -> Result<(), SealstoreError> {
        let encoded = self.encrypt(value.to_plaintext()?).await?;
        self.store.set(key, &encoded)
    }

    /// Eagerly migrate `keys`. Per-key failures land in
    /// [`MigrationReport::warnings`]; the pass itself never fails.
    pub async fn migrate_keys<I, K>(&self, keys: I) -> MigrationReport
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut report = MigrationReport::default();

        for key in keys {
            let key = key.as_ref();
            let raw = match self.store.get(key) {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    report.missing.push(key.to_string());
                    continue;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "could not read key for migration");
                    report.warnings.push(format!("{key}: {e}"));
                    continue;
                }
            };

            match self.decrypt(&raw).await {
                Ok(_) => {
                    debug!(key = %key, "already encrypted");
                    report.skipped.push(key.to_string());
                }
                Err(DecryptError::Unavailable(reason)) => {
                    report.warnings.push(format!("{key}: {reason}"));
                }
                Err(_) => {
                    let value = classify_legacy(raw);
                    match self.reencrypt(key, &value).await {
                        Ok(()) => {
                            info!(key = %key, kind = value.kind(), "migrated legacy value to encrypted storage");
                            report.migrated.push(key.to_string());
                        }
                        Err(e) => {
                            warn!(key = %key, error = %e, "re-encryption failed");
                            report.warnings.push(format!("{key}: {e}"));
                        }
                    }
                }
            }
        }

        info!(
            migrated = report.migrated.len(),
            skipped = report.skipped.len(),
            missing = report.missing.len(),
            warnings = report.warnings.len(),
            "migration pass complete"
        );
        report
    }

    /// Migrate every key currently in the store.
    pub async fn migrate_all(&self) -> Result<MigrationReport, SealstoreError> {
        let keys = self.store.keys()?;
        Ok(self.migrate_keys(keys).await)
    }
}
