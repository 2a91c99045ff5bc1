//! Command to check bot latency.

use crate::extension::{Extension, ExtensionError, ExtensionHost};
use crate::framework::{Context, Error};
use nightcore_common::format_millis;

/// Identifier of the ping cog.
pub const EXTENSION_ID: &str = "features.meta.commands.ping";

/// Cog holding the `ping` command.
#[derive(Debug, Default)]
pub struct Ping;

impl Extension for Ping {
    fn name(&self) -> &'static str {
        "Ping"
    }

    fn setup(&self, host: &mut ExtensionHost) -> Result<(), ExtensionError> {
        host.add_cog(self.name(), vec![ping()])
    }
}

/// Constructor registered in the extension table.
pub fn extension() -> Box<dyn Extension> {
    Box::new(Ping)
}

/// Check the bot's latency.
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    let reply = poise::CreateReply::default()
        .content(format!("Pong! Latency: {} ms", format_millis(latency)))
        .ephemeral(true);

    ctx.send(reply).await?;
    Ok(())
}
