//! Meta command cogs.

pub mod ping;

use nightcore_common::ExtensionId;

/// Enabled meta command cogs, in load order.
pub const EXTENSIONS: &[&str] = &[ping::EXTENSION_ID];

/// Returns the enabled meta command cogs.
pub fn extensions() -> Vec<ExtensionId> {
    EXTENSIONS.iter().copied().map(ExtensionId::from).collect()
}
