//! Poise framework setup and shared command data.

use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Application data accessible in all commands.
#[derive(Debug, Clone)]
pub struct Data {
    /// Names of the cogs that loaded successfully, in load order.
    pub cogs: Vec<String>,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Command type registered by extensions.
pub type Command = poise::Command<Data, Error>;

/// Prefix for text commands.
pub const COMMAND_PREFIX: &str = ".";

/// Creates the framework options for the given commands.
///
/// Every command runs behind the guild-only check; there is no help command.
pub fn framework_options(commands: Vec<Command>) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands,
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(COMMAND_PREFIX.into()),
            ..Default::default()
        },
        command_check: Some(|ctx| Box::pin(crate::guild::guild_only(ctx))),
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}

async fn event_handler(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        info!("Loaded cogs: {:?}", data.cogs);
        info!("Connected to {} guilds", data_about_bot.guilds.len());
        info!("Bot started successfully!");
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
        }
        poise::FrameworkError::CommandCheckFailed {
            error: ref check_error,
            ..
        } if check_already_answered(check_error.as_ref()) => {}
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Whether a failed command check has already replied to the user.
///
/// The guild-only check answers before returning `false` and carries no
/// error, so nothing more is sent or logged for it.
const fn check_already_answered(error: Option<&Error>) -> bool {
    error.is_none()
}
