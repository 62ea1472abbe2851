// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decryption outcomes.

use thiserror::Error;

/// Why a stored string could not be decrypted.
///
/// Every variant is an expected outcome, not a fault: the storage adapter
/// answers all of them the same way, by reinterpreting the stored string as
/// legacy plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// Not a `salt.iv.ciphertext` record: wrong segment count, bad base64,
    /// wrong salt or IV length, or plaintext that is not UTF-8.
    #[error("malformed record: {0}")]
    Encoding(String),

    /// The GCM tag did not verify. Wrong key, tampered bytes, or a record
    /// written by something else.
    #[error("record failed authentication")]
    Authentication,

    /// The cipher could not be set up on this platform.
    #[error("decryption unavailable: {0}")]
    Unavailable(String),
}
