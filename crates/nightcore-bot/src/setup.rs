//! Client construction from the runtime configuration.

use crate::bot::NightcoreBot;
use nightcore_commands::{collect_extensions, ExtensionCatalog, ExtensionTable};
use nightcore_common::LoggingContext;
use nightcore_config::RuntimeConfig;
use tracing::debug;

/// Builds the single client instance for this process.
///
/// The load list is composed from the builtin catalog filtered through the
/// configured toggles; identifiers are resolved in the builtin table.
pub fn create_bot(runtime: &RuntimeConfig, logging: &'static LoggingContext) -> NightcoreBot {
    let extensions = collect_extensions(&runtime.extensions, &ExtensionCatalog::builtin());
    debug!("Creating bot with {} extensions", extensions.len());

    NightcoreBot::new(
        extensions,
        ExtensionTable::builtin(),
        runtime.transport.clone(),
        logging,
    )
}
