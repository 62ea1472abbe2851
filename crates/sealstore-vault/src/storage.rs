// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transparent encryption over a durable key-value store.
//!
//! Writes always encrypt. Reads decrypt, and anything that does not decrypt
//! is treated as a value written before encryption existed: it is returned
//! to the caller and rewritten as an encrypted record in the same call.

use std::sync::Arc;

use sealstore_core::{KeyValueStore, SealstoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cipher;
use crate::error::DecryptError;
use crate::passphrase::Passphrase;
use crate::value::SecretValue;

/// Encrypting adapter around a [`KeyValueStore`].
///
/// Cheap to clone; clones share the store and the passphrase.
pub struct SecureStorage<S: ?Sized> {
    pub(crate) store: Arc<S>,
    pub(crate) passphrase: Passphrase,
}

impl<S: ?Sized> Clone for SecureStorage<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            passphrase: self.passphrase.clone(),
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for SecureStorage<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureStorage")
            .field("passphrase", &self.passphrase)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore + ?Sized> SecureStorage<S> {
    pub fn new(store: Arc<S>, passphrase: Passphrase) -> Self {
        Self { store, passphrase }
    }

    /// Adapter keyed by the passphrase compiled into this build.
    pub fn with_embedded_passphrase(store: Arc<S>) -> Self {
        Self::new(store, Passphrase::embedded())
    }

    /// The underlying store. Reads through it see ciphertext.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every key currently in the store.
    pub fn keys(&self) -> Result<Vec<String>, SealstoreError> {
        self.store.keys()
    }

    /// Encrypt `value` and store it under `key`, replacing any prior value.
    pub async fn write_secure(
        &self,
        key: &str,
        value: impl Into<SecretValue>,
    ) -> Result<(), SealstoreError> {
        let value = value.into();
        let encoded = self.encrypt(value.to_plaintext()?).await?;
        self.store.set(key, &encoded)?;
        debug!(key = %key, kind = value.kind(), "secure value written");
        Ok(())
    }

    /// Serialize `value` to JSON and store it encrypted. A value that
    /// serializes to a JSON string is stored as that raw string.
    pub async fn write_secure_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), SealstoreError> {
        let value = SecretValue::from_serializable(value)?;
        self.write_secure(key, value).await
    }

    /// Read and decrypt the value under `key`.
    ///
    /// Returns `Ok(None)` only when the key is absent. A stored value that
    /// fails to decrypt is classified as legacy plaintext, re-encrypted in
    /// place, and returned. Failing to re-encrypt is logged, not returned.
    pub async fn read_secure(&self, key: &str) -> Result<Option<SecretValue>, SealstoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match self.decrypt(&raw).await {
            Ok(plaintext) => Ok(Some(SecretValue::from_plaintext(plaintext))),
            Err(cause) => Ok(Some(self.recover_legacy(key, raw, &cause).await)),
        }
    }

    /// [`read_secure`](Self::read_secure), then deserialize into `T`.
    /// A `Raw` value deserializes as a JSON string.
    pub async fn read_secure_as<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, SealstoreError> {
        self.read_secure(key)
            .await?
            .map(SecretValue::deserialize)
            .transpose()
    }

    /// Delete `key`. Removing an absent key succeeds.
    pub fn remove_secure(&self, key: &str) -> Result<(), SealstoreError> {
        self.store.remove(key)?;
        debug!(key = %key, "secure value removed");
        Ok(())
    }

    pub(crate) async fn encrypt(&self, plaintext: String) -> Result<String, SealstoreError> {
        let passphrase = self.passphrase.clone();
        tokio::task::spawn_blocking(move || cipher::encrypt_value(&passphrase, &plaintext))
            .await
            .map_err(|e| SealstoreError::Internal(format!("encryption task failed: {e}")))?
    }

    pub(crate) async fn decrypt(&self, raw: &str) -> Result<String, DecryptError> {
        let passphrase = self.passphrase.clone();
        let raw = raw.to_string();
        tokio::task::spawn_blocking(move || cipher::decrypt_value(&passphrase, &raw))
            .await
            .map_err(|e| DecryptError::Unavailable(format!("decryption task failed: {e}")))?
    }
}

/// Mask a secret for display: first four and last four characters, or
/// `****` when fewer than 10 characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
