//! Guild-only command check.

use crate::framework::{Context, Error};
use tracing::debug;

/// Reply sent when a command is used outside a guild.
pub const GUILD_ONLY_MESSAGE: &str = "Commands are only available in servers.";

/// Rejects commands invoked outside a guild with an ephemeral notice.
///
/// Failing to send the notice (e.g. the interaction was already answered)
/// does not turn the rejection into an error.
pub async fn guild_only(ctx: Context<'_>) -> Result<bool, Error> {
    if ctx.guild_id().is_some() {
        return Ok(true);
    }

    let reply = poise::CreateReply::default()
        .content(GUILD_ONLY_MESSAGE)
        .ephemeral(true);
    if let Err(err) = ctx.send(reply).await {
        debug!("Could not send guild-only notice: {}", err);
    }
    Ok(false)
}
