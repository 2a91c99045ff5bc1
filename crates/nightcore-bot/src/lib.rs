//! # Nightcore Bot
//!
//! Discord client for Nightcore.
//!
//! This is the main binary crate. It assembles the client from the runtime
//! configuration, drives the startup sequence (extension loading, gateway
//! warm-up, command synchronization) and hands control to poise.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod lifecycle;
pub mod setup;
pub mod transport;

pub use bot::*;
pub use error::*;
pub use lifecycle::*;
pub use setup::*;
