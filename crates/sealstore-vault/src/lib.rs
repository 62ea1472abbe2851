// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted credential storage for sealstore.
//!
//! Values are encrypted with AES-256-GCM under a key derived per record via
//! PBKDF2-HMAC-SHA256 from a build-time passphrase, then stored as
//! `salt.iv.ciphertext` text in any [`sealstore_core::KeyValueStore`].
//! Values written before encryption was introduced are read transparently
//! and upgraded in place.

pub mod cipher;
pub mod crypto;
pub mod error;
pub mod kdf;
pub mod migration;
pub mod passphrase;
pub mod record;
pub mod storage;
pub mod value;

pub use cipher::{decrypt_value, encrypt_value};
pub use error::DecryptError;
pub use migration::{MigrationReport, classify_legacy};
pub use passphrase::Passphrase;
pub use record::SecureRecord;
pub use storage::{SecureStorage, mask_secret};
pub use value::SecretValue;
