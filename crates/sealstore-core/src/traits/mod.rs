// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions shared across the workspace.

pub mod store;

pub use store::KeyValueStore;
