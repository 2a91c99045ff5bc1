//! # Nightcore Common
//!
//! Shared types, logging, and common functionality for Nightcore Bot.
//!
//! This crate provides the foundational types and the process-wide logging
//! context used across all other crates in the Nightcore workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::{LoggingConfig, LoggingContext};
pub use types::*;
pub use utils::*;
