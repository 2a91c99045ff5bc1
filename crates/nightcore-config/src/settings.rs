//! Typed settings groups populated from environment variables.

use crate::error::ConfigError;
use crate::loader::EnvVars;
use nightcore_common::mask_secret;
use std::fmt;

/// A named group of settings built from environment variables.
pub trait SettingsGroup: Sized {
    /// Group name used in error messages.
    const NAME: &'static str;

    /// Builds the group, failing on the first missing required field.
    fn from_env(vars: &EnvVars) -> Result<Self, ConfigError>;
}

/// Bot credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// Discord bot token (`BOT_TOKEN`).
    pub bot_token: String,
}

impl BotSettings {
    /// Environment key of the bot token.
    pub const BOT_TOKEN: &'static str = "BOT_TOKEN";
}

impl SettingsGroup for BotSettings {
    const NAME: &'static str = "bot";

    fn from_env(vars: &EnvVars) -> Result<Self, ConfigError> {
        Ok(Self {
            bot_token: vars.required(Self::NAME, Self::BOT_TOKEN)?.to_string(),
        })
    }
}

impl fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSettings")
            .field("bot_token", &mask_secret(&self.bot_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_settings_from_env() {
        let vars = EnvVars::from_pairs([("BOT_TOKEN", "MTEx.abc.def"), ("OTHER", "x")]);
        let settings = BotSettings::from_env(&vars).unwrap();
        assert_eq!(settings.bot_token, "MTEx.abc.def");
    }

    #[test]
    fn test_bot_settings_missing_token() {
        let err = BotSettings::from_env(&EnvVars::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required configuration 'BOT_TOKEN' for bot settings"
        );
    }

    #[test]
    fn test_debug_masks_token() {
        let settings = BotSettings {
            bot_token: "MTEx.secret.value".to_string(),
        };
        let debug = format!("{settings:?}");
        assert!(debug.contains("MTEx***"));
        assert!(!debug.contains("secret"));
    }
}
