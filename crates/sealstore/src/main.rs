// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sealstore - encrypted local credential store.
//!
//! Binary entry point: parses arguments, loads configuration, installs
//! logging, and dispatches to [`commands`].

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sealstore_core::StoreBackend;

/// sealstore - encrypted local credential store.
#[derive(Parser, Debug)]
#[command(name = "sealstore", version, about, long_about = None)]
struct Cli {
    /// Database file to use instead of `storage.database_path`.
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print a stored value (masked unless --reveal).
    Get {
        key: String,
        /// Print the full value.
        #[arg(long)]
        reveal: bool,
    },
    /// Encrypt and store a value.
    Set {
        key: String,
        value: String,
        /// Parse VALUE as JSON and store it structured.
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored value.
    Remove { key: String },
    /// List stored keys and whether each is encrypted yet.
    List,
    /// Re-encrypt legacy plaintext values. Migrates every key when none are given.
    Migrate { keys: Vec<String> },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match sealstore_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sealstore_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    if let Some(db) = cli.db {
        config.storage.backend = StoreBackend::Sqlite;
        config.storage.database_path = db.display().to_string();
    }

    match commands::run(cli.command, &config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("sealstore: {e}");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sealstore={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
