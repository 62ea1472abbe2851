// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key-value store trait.

use std::sync::Arc;

use crate::error::SealstoreError;

/// A synchronous string-to-string store that survives process restarts.
///
/// Implementations hold raw strings only. They know nothing about encryption;
/// whatever is handed to [`set`](KeyValueStore::set) comes back unchanged
/// from [`get`](KeyValueStore::get).
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the raw value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SealstoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SealstoreError>;

    /// Deletes `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SealstoreError>;

    /// Lists every stored key in ascending order.
    fn keys(&self) -> Result<Vec<String>, SealstoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, SealstoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SealstoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SealstoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, SealstoreError> {
        (**self).keys()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, SealstoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SealstoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SealstoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, SealstoreError> {
        (**self).keys()
    }
}
