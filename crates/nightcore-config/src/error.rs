//! Configuration loading errors.

use std::path::PathBuf;

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was absent or empty.
    #[error("Missing required configuration '{key}' for {group} settings")]
    MissingField {
        /// Settings group that declares the field.
        group: &'static str,
        /// Environment key of the field.
        key: &'static str,
    },

    /// The `.env` file exists but could not be parsed.
    #[error("Failed to read environment file {}: {source}", .path.display())]
    EnvFile {
        /// Path of the `.env` file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: dotenvy::Error,
    },

    /// I/O error when reading a configuration file.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The runtime configuration file is not valid TOML for the schema.
    #[error("Failed to parse configuration file {}: {source}", .path.display())]
    Toml {
        /// Path of the TOML file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

impl From<ConfigError> for nightcore_common::NightcoreError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}
