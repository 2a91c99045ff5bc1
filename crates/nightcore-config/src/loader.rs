//! Loading of the `.env` file, the process environment, and `nightcore.toml`.

use crate::error::ConfigError;
use crate::schema::RuntimeConfig;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::debug;

/// Environment variables visible to settings groups.
///
/// Keys are stored upper-cased, so lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Builds a variable set from explicit pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars = Self::default();
        vars.merge(pairs);
        vars
    }

    /// Reads `env_file` and lays the process environment over it.
    ///
    /// A missing file is not an error; the process environment alone is used.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        let mut vars = Self::read_env_file(env_file)?;
        vars.merge(process_env());
        Ok(vars)
    }

    /// Reads only the `.env` file at `path`.
    pub fn read_env_file(path: &Path) -> Result<Self, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No environment file at {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut vars = Self::default();
        for item in iter {
            let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
            vars.insert(key, value);
        }
        Ok(vars)
    }

    /// Adds `pairs`, replacing existing values for the same key.
    pub fn merge<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.insert(key.into(), value.into());
        }
    }

    /// Looks up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&key.to_uppercase()).map(String::as_str)
    }

    /// Looks up a variable that must be present and non-empty.
    pub fn required(&self, group: &'static str, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingField { group, key })
    }

    /// Consumes the set, yielding `(KEY, value)` pairs.
    pub fn into_pairs(self) -> impl Iterator<Item = (String, String)> {
        self.vars.into_iter()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn insert(&mut self, key: String, value: String) {
        self.vars.insert(key.to_uppercase(), value);
    }
}

/// The process environment, skipping entries that are not valid UTF-8.
fn process_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

impl RuntimeConfig {
    /// Loads runtime options from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No runtime configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Parses runtime options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
