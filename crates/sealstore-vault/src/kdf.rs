// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! Every record gets its own random salt, so every record gets its own key.
//! The iteration count is part of the on-store format: changing it makes
//! existing records undecryptable.

use std::num::NonZeroU32;

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use sealstore_core::SealstoreError;
use zeroize::Zeroizing;

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

const ITERATIONS: NonZeroU32 = match NonZeroU32::new(KDF_ITERATIONS) {
    Some(n) => n,
    None => panic!("KDF_ITERATIONS must be non-zero"),
};

/// Derive a 32-byte key from `passphrase` and `salt`.
///
/// Deterministic for a given pair. The key is zeroed when dropped.
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        ITERATIONS,
        salt,
        passphrase,
        key.as_mut(),
    );
    key
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], SealstoreError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new().fill(&mut salt).map_err(|_| {
        SealstoreError::UnsupportedEnvironment("system random source unavailable".to_string())
    })?;
    Ok(salt)
}
