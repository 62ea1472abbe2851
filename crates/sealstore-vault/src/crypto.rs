// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM seal/open over a single derived key.
//!
//! [`seal`] draws a fresh 96-bit IV from the system CSPRNG on every call.
//! The tag is appended to the ciphertext, never stored separately.

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use sealstore_core::SealstoreError;

use crate::error::DecryptError;
use crate::kdf::KEY_LEN;

/// IV length in bytes.
pub const IV_LEN: usize = NONCE_LEN;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

fn cipher_key(key: &[u8; KEY_LEN]) -> Option<LessSafeKey> {
    UnboundKey::new(&AES_256_GCM, key).ok().map(LessSafeKey::new)
}

/// Encrypt `plaintext` under `key` with a random IV.
///
/// Returns `(ciphertext || tag, iv)`.
pub fn seal(
    key: &[u8; KEY_LEN],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; IV_LEN]), SealstoreError> {
    let cipher = cipher_key(key).ok_or_else(|| {
        SealstoreError::UnsupportedEnvironment("AES-256-GCM unavailable".to_string())
    })?;

    let mut iv = [0u8; IV_LEN];
    SystemRandom::new().fill(&mut iv).map_err(|_| {
        SealstoreError::UnsupportedEnvironment("system random source unavailable".to_string())
    })?;

    let mut in_out = plaintext.to_vec();
    cipher
        .seal_in_place_append_tag(Nonce::assume_unique_for_key(iv), Aad::empty(), &mut in_out)
        .map_err(|_| SealstoreError::Internal("AES-256-GCM encryption failed".to_string()))?;

    Ok((in_out, iv))
}

/// Decrypt `ciphertext` (tag included) under `key`.
pub fn open(
    key: &[u8; KEY_LEN],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, DecryptError> {
    let cipher = cipher_key(key)
        .ok_or_else(|| DecryptError::Unavailable("AES-256-GCM unavailable".to_string()))?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = cipher
        .open_in_place(Nonce::assume_unique_for_key(*iv), Aad::empty(), &mut in_out)
        .map_err(|_| DecryptError::Authentication)?;

    Ok(plaintext.to_vec())
}
