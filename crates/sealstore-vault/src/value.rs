// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Values held in secure storage.

use std::fmt;

use sealstore_core::SealstoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A decrypted value.
///
/// Strings are stored verbatim. Anything else is stored as compact JSON
/// and comes back as `Structured` because its plaintext parses as JSON.
/// A string whose text happens to be valid JSON (`"42"`, `"true"`) also
/// comes back `Structured`.
#[derive(Clone, PartialEq)]
pub enum SecretValue {
    Raw(String),
    Structured(Value),
}

impl SecretValue {
    /// Classify a decrypted plaintext.
    pub fn from_plaintext(plaintext: String) -> Self {
        match serde_json::from_str::<Value>(&plaintext) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(plaintext),
        }
    }

    /// Convert any serializable value. Values that serialize to a JSON
    /// string become `Raw`.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, SealstoreError> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// The exact text that gets encrypted.
    pub fn to_plaintext(&self) -> Result<String, SealstoreError> {
        match self {
            Self::Raw(s) => Ok(s.clone()),
            Self::Structured(v) => Ok(serde_json::to_string(v)?),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Raw(s) => Some(s),
            Self::Structured(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Raw(_) => None,
            Self::Structured(v) => Some(v),
        }
    }

    /// `"raw"` or `"structured"`, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Structured(_) => "structured",
        }
    }

    /// The value as JSON. `Raw` becomes a JSON string.
    pub fn into_json(self) -> Value {
        match self {
            Self::Raw(s) => Value::String(s),
            Self::Structured(v) => v,
        }
    }

    /// Deserialize into `T`. `Raw` deserializes as a JSON string.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, SealstoreError> {
        Ok(serde_json::from_value(self.into_json())?)
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(_) => f.write_str("Raw([REDACTED])"),
            Self::Structured(_) => f.write_str("Structured([REDACTED])"),
        }
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<Value> for SecretValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Raw(s),
            other => Self::Structured(other),
        }
    }
}
