// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-in, string-out encryption of a single value.
//!
//! Both functions are CPU-bound (one PBKDF2 derivation each). Async callers
//! should run them on a blocking thread, as [`crate::SecureStorage`] does.

use sealstore_core::SealstoreError;

use crate::crypto;
use crate::error::DecryptError;
use crate::kdf;
use crate::passphrase::Passphrase;
use crate::record::SecureRecord;

/// Encrypt `plaintext` into a `salt.iv.ciphertext` record.
///
/// Fresh salt and IV every call: the same input never encrypts to the same
/// output twice.
pub fn encrypt_value(passphrase: &Passphrase, plaintext: &str) -> Result<String, SealstoreError> {
    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key(passphrase.as_bytes(), &salt);
    let (ciphertext, iv) = crypto::seal(&key, plaintext.as_bytes())?;
    Ok(SecureRecord::new(salt, iv, ciphertext).encode())
}

/// Decrypt a record produced by [`encrypt_value`].
pub fn decrypt_value(passphrase: &Passphrase, encoded: &str) -> Result<String, DecryptError> {
    let record = SecureRecord::parse(encoded)?;
    let key = kdf::derive_key(passphrase.as_bytes(), record.salt());
    let plaintext = crypto::open(&key, record.iv(), record.ciphertext())?;
    String::from_utf8(plaintext)
        .map_err(|e| DecryptError::Encoding(format!("plaintext is not valid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    use super::*;

    fn passphrase() -> Passphrase {
        Passphrase::new("test-passphrase")
    }

    #[test]
    fn decrypt_inverts_encrypt() {
        let p = passphrase();
        for text in ["", "x", "sk-ant-api03-abcdef", "{\"host\":\"h\",\"port\":1}", "ünïcödé 🔐"] {
            let encoded = encrypt_value(&p, text).unwrap();
            assert_eq!(decrypt_value(&p, &encoded).unwrap(), text);
        }
    }

    #[test]
    fn encryption_is_not_deterministic() {
        let p = passphrase();
        let a = encrypt_value(&p, "same").unwrap();
        let b = encrypt_value(&p, "same").unwrap();
        assert_ne!(a, b);
        let salt_a = a.split('.').next().unwrap();
        let salt_b = b.split('.').next().unwrap();
        assert_ne!(salt_a, salt_b);
    }

    #[test]
    fn wrong_passphrase_fails_authentication() {
        let encoded = encrypt_value(&passphrase(), "secret").unwrap();
        assert_eq!(
            decrypt_value(&Passphrase::new("other"), &encoded),
            Err(DecryptError::Authentication)
        );
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let p = passphrase();
        let encoded = encrypt_value(&p, "secret").unwrap();
        let parts: Vec<&str> = encoded.split('.').collect();
        let mut ciphertext = STANDARD.decode(parts[2]).unwrap();
        ciphertext[0] ^= 0x01;
        let tampered = format!("{}.{}.{}", parts[0], parts[1], STANDARD.encode(&ciphertext));

        assert_eq!(
            decrypt_value(&p, &tampered),
            Err(DecryptError::Authentication)
        );
    }

    #[test]
    fn legacy_plaintext_is_an_encoding_error() {
        let p = passphrase();
        for legacy in ["localhost:8108", "{\"a\":1}", "a.b", "x.y.z.w"] {
            assert!(matches!(
                decrypt_value(&p, legacy),
                Err(DecryptError::Encoding(_))
            ));
        }
    }

    #[test]
    fn non_utf8_plaintext_is_an_encoding_error() {
        let p = passphrase();
        let salt = [9u8; kdf::SALT_LEN];
        let key = kdf::derive_key(b"test-passphrase", &salt);
        let (ciphertext, iv) = crypto::seal(&key, &[0xff, 0xfe, 0xfd]).unwrap();
        let encoded = SecureRecord::new(salt, iv, ciphertext).encode();

        assert!(matches!(
            decrypt_value(&p, &encoded),
            Err(DecryptError::Encoding(_))
        ));
    }
}
