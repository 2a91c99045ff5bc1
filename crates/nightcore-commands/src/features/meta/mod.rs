//! Meta feature: commands about the bot itself.

pub mod commands;

use nightcore_common::ExtensionId;

/// Returns every enabled cog of the meta feature, category by category.
pub fn extensions() -> Vec<ExtensionId> {
    commands::extensions()
}
