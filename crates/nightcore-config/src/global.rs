//! Global composition of every settings group.

use crate::error::ConfigError;
use crate::loader::EnvVars;
use crate::schema::RuntimeConfig;
use crate::settings::{BotSettings, SettingsGroup};
use once_cell::sync::{Lazy, OnceCell};
use std::path::{Path, PathBuf};

/// Name of the secrets file in the project root.
pub const ENV_FILE_NAME: &str = ".env";

/// Name of the runtime options file in the project root.
pub const RUNTIME_FILE_NAME: &str = "nightcore.toml";

static GLOBAL: Lazy<GlobalConfig> = Lazy::new(|| GlobalConfig::new(project_root()));

/// Project root, two levels above this crate's manifest.
pub fn project_root() -> PathBuf {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    root.canonicalize().unwrap_or(root)
}

/// Composes all settings groups and builds each one on first access.
///
/// Every group is cached in its own cell; a failed build is not cached, so
/// the next access retries.
#[derive(Debug)]
pub struct GlobalConfig {
    root: PathBuf,
    environment: Option<EnvVars>,
    bot: OnceCell<BotSettings>,
    runtime: OnceCell<RuntimeConfig>,
}

impl GlobalConfig {
    /// The process-wide instance rooted at [`project_root`].
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Creates a composition rooted at `root` that reads the process environment.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            environment: None,
            bot: OnceCell::new(),
            runtime: OnceCell::new(),
        }
    }

    /// Creates a composition that uses `environment` instead of the process
    /// environment when overlaying the `.env` file.
    pub fn with_environment(root: impl Into<PathBuf>, environment: EnvVars) -> Self {
        Self {
            environment: Some(environment),
            ..Self::new(root)
        }
    }

    /// Path of the `.env` file.
    pub fn env_path(&self) -> PathBuf {
        self.root.join(ENV_FILE_NAME)
    }

    /// Path of `nightcore.toml`.
    pub fn runtime_path(&self) -> PathBuf {
        self.root.join(RUNTIME_FILE_NAME)
    }

    /// Bot credentials.
    pub fn bot(&self) -> Result<&BotSettings, ConfigError> {
        self.bot.get_or_try_init(|| self.load_group())
    }

    /// Runtime options.
    pub fn runtime(&self) -> Result<&RuntimeConfig, ConfigError> {
        self.runtime
            .get_or_try_init(|| RuntimeConfig::load(&self.runtime_path()))
    }

    fn load_group<G: SettingsGroup>(&self) -> Result<G, ConfigError> {
        let vars = match &self.environment {
            Some(environment) => {
                let mut vars = EnvVars::read_env_file(&self.env_path())?;
                vars.merge(environment.clone().into_pairs());
                vars
            }
            None => EnvVars::load(&self.env_path())?,
        };
        G::from_env(&vars)
    }
}
