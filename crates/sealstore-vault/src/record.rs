// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted text form of an encrypted value.
//!
//! `base64(salt) "." base64(iv) "." base64(ciphertext || tag)`, standard
//! alphabet with padding. Nothing else is stored: the salt recovers the key
//! and the iterations are fixed.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::crypto::{IV_LEN, TAG_LEN};
use crate::error::DecryptError;
use crate::kdf::SALT_LEN;

/// Segment separator. Never produced by the standard base64 alphabet.
pub const SEPARATOR: char = '.';

/// A parsed `salt.iv.ciphertext` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureRecord {
    salt: [u8; SALT_LEN],
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl SecureRecord {
    pub fn new(salt: [u8; SALT_LEN], iv: [u8; IV_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            salt,
            iv,
            ciphertext,
        }
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    /// Ciphertext with the GCM tag appended.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Parse a stored string. Checks shape only; authenticity is checked on
    /// decryption.
    pub fn parse(encoded: &str) -> Result<Self, DecryptError> {
        let segments: Vec<&str> = encoded.split(SEPARATOR).collect();
        let [salt, iv, ciphertext] = segments.as_slice() else {
            return Err(DecryptError::Encoding(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let salt = decode_fixed::<SALT_LEN>("salt", salt)?;
        let iv = decode_fixed::<IV_LEN>("iv", iv)?;
        let ciphertext = decode_segment("ciphertext", ciphertext)?;
        if ciphertext.len() < TAG_LEN {
            return Err(DecryptError::Encoding(format!(
                "ciphertext is {} bytes, shorter than the {TAG_LEN}-byte tag",
                ciphertext.len()
            )));
        }

        Ok(Self::new(salt, iv, ciphertext))
    }

    /// Whether `encoded` has the shape of a record. Says nothing about
    /// whether it decrypts.
    pub fn is_well_formed(encoded: &str) -> bool {
        Self::parse(encoded).is_ok()
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            STANDARD.encode(self.salt),
            STANDARD.encode(self.iv),
            STANDARD.encode(&self.ciphertext)
        )
    }
}

impl fmt::Display for SecureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for SecureRecord {
    type Err = DecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>, DecryptError> {
    STANDARD
        .decode(segment)
        .map_err(|e| DecryptError::Encoding(format!("{name} is not valid base64: {e}")))
}

fn decode_fixed<const N: usize>(name: &str, segment: &str) -> Result<[u8; N], DecryptError> {
    let bytes = decode_segment(name, segment)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| DecryptError::Encoding(format!("{name} must be {N} bytes, got {len}")))
}
