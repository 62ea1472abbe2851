// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for sealstore.
//!
//! Holds the shared error type, the durable key-value store trait, and the
//! small set of types every other crate in the workspace agrees on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SealstoreError;
pub use traits::KeyValueStore;
pub use types::StoreBackend;
