// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across sealstore crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which durable store backend to open.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// Single-file SQLite database.
    #[default]
    Sqlite,
    /// Process-local map; nothing survives a restart.
    Memory,
}
