//! Application-wide error types using thiserror.

use crate::lifecycle::ClientState;
use nightcore_common::NightcoreError;
use nightcore_config::ConfigError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// The HTTP transport could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A startup request did not finish in time.
    #[error("Timed out during {0}")]
    Timeout(&'static str),

    /// A startup step was attempted out of order, e.g. a second run.
    #[error("Cannot move client from {from} to {to}")]
    InvalidState {
        /// State the client was in.
        from: ClientState,
        /// State the step needed to enter.
        to: ClientState,
    },
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;

impl From<BotError> for NightcoreError {
    fn from(err: BotError) -> Self {
        match err {
            BotError::Config(e) => e.into(),
            e @ BotError::InvalidState { .. } => Self::Startup(e.to_string()),
            e @ (BotError::Discord(_) | BotError::Http(_) | BotError::Timeout(_)) => {
                Self::Discord(e.to_string())
            }
        }
    }
}
