//! # Nightcore Commands
//!
//! Discord extensions ("cogs") for Nightcore Bot and the machinery that
//! loads and reports them.
//!
//! Extensions are looked up by identifier in a registration table built at
//! compile time ([`ExtensionTable::builtin`]). Which identifiers are loaded is
//! decided by the per-feature and per-category lists in [`features`],
//! [`events`] and [`tasks`], filtered through the configured toggles.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod events;
pub mod extension;
pub mod features;
pub mod framework;
pub mod guild;
pub mod registry;
pub mod tasks;
pub mod tree;

pub use extension::*;
pub use framework::*;
pub use registry::*;
pub use tree::*;
