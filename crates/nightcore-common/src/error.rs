//! Application-wide error type shared by the workspace crates.

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, NightcoreError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum NightcoreError {
    /// Configuration error, raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Discord API or transport error.
    #[error("Discord API error: {0}")]
    Discord(String),

    /// The client was driven out of its startup order.
    #[error("Startup error: {0}")]
    Startup(String),
}

impl NightcoreError {
    /// Creates a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
