// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The application passphrase all record keys are derived from.
//!
//! The passphrase is fixed when the binary is compiled: set
//! `SEALSTORE_PASSPHRASE` in the build environment to override the default.
//! Anyone holding the binary can recover it, so records are protected
//! against casual inspection of the store, not against a local attacker.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

/// Passphrase used when none was supplied at build time.
const DEFAULT_PASSPHRASE: &str = "sealstore/local-credential-store/v1";

/// Passphrase baked in at compile time, if the build set one.
const BUILD_PASSPHRASE: Option<&str> = option_env!("SEALSTORE_PASSPHRASE");

/// Immutable key-derivation passphrase. Cloning shares the same secret.
#[derive(Clone)]
pub struct Passphrase(Arc<SecretString>);

impl Passphrase {
    /// Wrap an explicit passphrase. Intended for tests and for embedders
    /// that inject their own build-time value.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(Arc::new(SecretString::from(passphrase.into())))
    }

    /// The passphrase compiled into this build.
    pub fn embedded() -> Self {
        match BUILD_PASSPHRASE {
            Some(p) if !p.is_empty() => Self::new(p),
            _ => Self::new(DEFAULT_PASSPHRASE),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}
