//! # Nightcore Config
//!
//! Typed settings for Nightcore Bot.
//!
//! Secrets come from a `.env` file in the project root merged with the
//! process environment. Non-secret runtime options (which extensions are
//! enabled, HTTP transport tuning) come from an optional `nightcore.toml`.
//! [`GlobalConfig`] composes both and builds each group lazily.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod error;
pub mod global;
pub mod loader;
pub mod schema;
pub mod settings;

pub use error::*;
pub use global::*;
pub use loader::*;
pub use schema::*;
pub use settings::*;
