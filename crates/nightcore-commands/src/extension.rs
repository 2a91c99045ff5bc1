//! Extension (cog) registration and loading.
//!
//! Extensions are resolved through an [`ExtensionTable`] that maps each
//! identifier to a constructor function. Loading a list of identifiers never
//! aborts early: every failure is logged and recorded in the [`LoadReport`],
//! and the remaining identifiers are still attempted.

use crate::features::meta::commands::ping;
use crate::framework::Command;
use nightcore_common::ExtensionId;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::{error, info, warn};

/// Errors raised while loading a single extension.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    /// No constructor is registered for the identifier.
    #[error("Extension '{0}' is not registered")]
    NotFound(ExtensionId),

    /// The identifier was already loaded earlier in the same run.
    #[error("Extension '{0}' is already loaded")]
    AlreadyLoaded(ExtensionId),

    /// Another extension already registered a cog with this name.
    #[error("Cog named '{0}' already loaded")]
    CogAlreadyLoaded(String),

    /// A top-level command name is already taken.
    #[error("Command '{command}' from cog '{cog}' is already registered")]
    CommandConflict {
        /// Cog that tried to register the command.
        cog: String,
        /// Conflicting command name.
        command: String,
    },

    /// The extension's own setup failed.
    #[error("Setup failed: {0}")]
    Setup(String),
}

/// A loadable unit of commands.
pub trait Extension: Send + Sync {
    /// Cog name, used for logging and as the binding of its commands.
    fn name(&self) -> &'static str;

    /// Registers the extension's cogs and commands on `host`.
    fn setup(&self, host: &mut ExtensionHost) -> Result<(), ExtensionError>;
}

/// Creates an extension instance.
pub type ExtensionConstructor = fn() -> Box<dyn Extension>;

/// Collects what extensions register during loading.
#[derive(Default)]
pub struct ExtensionHost {
    commands: Vec<Command>,
    cogs: Vec<String>,
}

/// Position in an [`ExtensionHost`] that registrations can be rolled back to.
#[derive(Debug, Clone, Copy)]
struct Mark {
    commands: usize,
    cogs: usize,
}

impl ExtensionHost {
    /// Adds a cog and its commands.
    ///
    /// Commands without a category are bound to the cog name. Fails without
    /// registering anything when the cog name or a command name is taken.
    pub fn add_cog(
        &mut self,
        name: &'static str,
        mut commands: Vec<Command>,
    ) -> Result<(), ExtensionError> {
        if self.cogs.iter().any(|cog| cog == name) {
            return Err(ExtensionError::CogAlreadyLoaded(name.to_string()));
        }

        let mut seen: HashSet<&str> = self.commands.iter().map(|c| c.name.as_str()).collect();
        for command in &commands {
            if !seen.insert(command.name.as_str()) {
                return Err(ExtensionError::CommandConflict {
                    cog: name.to_string(),
                    command: command.name.clone(),
                });
            }
        }

        for command in &mut commands {
            bind_to_cog(command, name);
        }
        self.commands.extend(commands);
        self.cogs.push(name.to_string());
        Ok(())
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Loaded cog names, in registration order.
    pub fn cogs(&self) -> &[String] {
        &self.cogs
    }

    /// Splits the host into its commands and cog names.
    pub fn into_parts(self) -> (Vec<Command>, Vec<String>) {
        (self.commands, self.cogs)
    }

    fn mark(&self) -> Mark {
        Mark {
            commands: self.commands.len(),
            cogs: self.cogs.len(),
        }
    }

    fn rollback(&mut self, mark: Mark) {
        self.commands.truncate(mark.commands);
        self.cogs.truncate(mark.cogs);
    }
}

impl fmt::Debug for ExtensionHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionHost")
            .field(
                "commands",
                &self.commands.iter().map(|c| &c.name).collect::<Vec<_>>(),
            )
            .field("cogs", &self.cogs)
            .finish()
    }
}

fn bind_to_cog(command: &mut Command, cog: &'static str) {
    command.category.get_or_insert_with(|| cog.into());
    for subcommand in &mut command.subcommands {
        bind_to_cog(subcommand, cog);
    }
}

/// Compile-time registration table from identifier to constructor.
#[derive(Debug, Clone, Default)]
pub struct ExtensionTable {
    entries: BTreeMap<&'static str, ExtensionConstructor>,
}

impl ExtensionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every extension shipped in this crate.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.register(ping::EXTENSION_ID, ping::extension);
        table
    }

    /// Registers `constructor` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: &'static str, constructor: ExtensionConstructor) -> &mut Self {
        self.entries.insert(id, constructor);
        self
    }

    /// Looks up the constructor for `id`.
    pub fn get(&self, id: &ExtensionId) -> Option<ExtensionConstructor> {
        self.entries.get(id.as_str()).copied()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Number of registered extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of loading a list of extensions.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Identifiers that loaded, in load order.
    pub loaded: Vec<ExtensionId>,
    /// Identifiers that failed, with the reason.
    pub failed: Vec<(ExtensionId, ExtensionError)>,
}

impl LoadReport {
    /// Whether every identifier loaded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Loads every identifier in `ids` through `table`.
///
/// A failing extension leaves nothing behind in the host and does not stop
/// the ones after it.
pub fn load_extensions(ids: &[ExtensionId], table: &ExtensionTable) -> (ExtensionHost, LoadReport) {
    info!("Starting to load extensions...");

    let mut host = ExtensionHost::default();
    let mut report = LoadReport::default();

    if ids.is_empty() {
        warn!("No cogs to load");
        return (host, report);
    }

    for id in ids {
        info!("Loading cog: {}", id);
        match load_one(id, table, &mut host, &report) {
            Ok(()) => {
                info!("[success] Successfully loaded {}", id);
                report.loaded.push(id.clone());
            }
            Err(e) => {
                error!("[failed] Failed to load {}: {}", id, e);
                report.failed.push((id.clone(), e));
            }
        }
    }

    (host, report)
}

fn load_one(
    id: &ExtensionId,
    table: &ExtensionTable,
    host: &mut ExtensionHost,
    report: &LoadReport,
) -> Result<(), ExtensionError> {
    if report.loaded.contains(id) {
        return Err(ExtensionError::AlreadyLoaded(id.clone()));
    }

    let constructor = table
        .get(id)
        .ok_or_else(|| ExtensionError::NotFound(id.clone()))?;
    let extension = constructor();

    let mark = host.mark();
    let result = extension.setup(host);
    if result.is_err() {
        host.rollback(mark);
    }
    result
}
