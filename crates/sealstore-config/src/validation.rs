// SPDX-FileCopyrightText: 2026 Sealstore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use sealstore_core::StoreBackend;

use crate::diagnostic::ConfigError;
use crate::model::SealstoreConfig;

/// Levels accepted by `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &SealstoreConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.backend == StoreBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (i, key) in config.migration.keys.iter().enumerate() {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("migration.keys[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SealstoreConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = SealstoreConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));
    }

    #[test]
    fn empty_database_path_is_fine_for_memory_backend() {
        let mut config = SealstoreConfig::default();
        config.storage.backend = StoreBackend::Memory;
        config.storage.database_path = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SealstoreConfig::default();
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "log.level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = SealstoreConfig::default();
        config.log.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn blank_migration_key_fails_validation() {
        let mut config = SealstoreConfig::default();
        config.migration.keys = vec!["connection".to_string(), "".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "migration.keys[1]"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SealstoreConfig::default();
        config.storage.database_path = String::new();
        config.log.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn migration_section_deserializes() {
        let toml_str = r#"
[migration]
on_startup = true
keys = ["connection", "openai_api_key"]
"#;
        let config: SealstoreConfig = toml::from_str(toml_str).unwrap();
        assert!(config.migration.on_startup);
        assert_eq!(config.migration.keys, vec!["connection", "openai_api_key"]);
    }
}
