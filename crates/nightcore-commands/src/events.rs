//! Event listener extensions.
//!
//! Disable an event cog by removing its identifier from [`EXTENSIONS`].

use nightcore_common::ExtensionId;

/// Enabled event cogs, in load order.
pub const EXTENSIONS: &[&str] = &[];

/// Returns the enabled event cogs.
pub fn extensions() -> Vec<ExtensionId> {
    EXTENSIONS.iter().copied().map(ExtensionId::from).collect()
}
