// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for sealstore.

use thiserror::Error;

/// The primary error type shared by every sealstore crate.
#[derive(Debug, Error)]
pub enum SealstoreError {
    /// Configuration errors (invalid TOML, bad values, missing sections).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable store errors (database open, query failure, poisoned lock).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A value could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The platform cannot provide the cryptographic primitives we need
    /// (no CSPRNG, cipher construction failed).
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SealstoreError {
    /// Wrap any error as a storage failure.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage { source: err.into() }
    }
}

impl From<serde_json::Error> for SealstoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
