// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL files under `migrations/` are compiled into the binary and applied
//! every time a database is opened.

use sealstore_core::SealstoreError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), SealstoreError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(SealstoreError::storage)?;
    for migration in report.applied_migrations() {
        tracing::debug!(migration = %migration, "applied storage migration");
    }
    Ok(())
}
