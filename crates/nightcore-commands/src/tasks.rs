//! Background task extensions.
//!
//! Disable a task cog by removing its identifier from [`EXTENSIONS`].

use nightcore_common::ExtensionId;

/// Enabled task cogs, in load order.
pub const EXTENSIONS: &[&str] = &[];

/// Returns the enabled task cogs.
pub fn extensions() -> Vec<ExtensionId> {
    EXTENSIONS.iter().copied().map(ExtensionId::from).collect()
}
