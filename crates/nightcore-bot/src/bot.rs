//! Core bot logic using the Poise framework.

use crate::error::{BotError, BotResult};
use crate::lifecycle::{ClientState, Lifecycle};
use crate::transport::{build_http, build_http_client, warm_gateway};
use nightcore_commands::{
    framework_options, load_extensions, log_tree_summary, summarize_tree, Command, CommandNode,
    Data, ExtensionHost, ExtensionTable, LoadReport,
};
use nightcore_common::{ExtensionId, LoggingContext};
use nightcore_config::TransportConfig;
use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::{error, info, Instrument};

/// Main bot structure.
pub struct NightcoreBot {
    extensions: Vec<ExtensionId>,
    table: ExtensionTable,
    transport: TransportConfig,
    lifecycle: Lifecycle,
    logging: &'static LoggingContext,
}

impl NightcoreBot {
    /// Creates a bot that will load `extensions`, in order, from `table`.
    pub fn new(
        extensions: Vec<ExtensionId>,
        table: ExtensionTable,
        transport: TransportConfig,
        logging: &'static LoggingContext,
    ) -> Self {
        Self {
            extensions,
            table,
            transport,
            lifecycle: Lifecycle::new(),
            logging,
        }
    }

    /// Extensions to load, in load order.
    pub fn extensions(&self) -> &[ExtensionId] {
        &self.extensions
    }

    /// Transport options.
    pub const fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClientState {
        self.lifecycle.state()
    }

    /// Runs the bot until the gateway connection ends or Ctrl-C is received.
    ///
    /// The state is [`ClientState::Stopped`] afterwards, whatever the outcome.
    pub async fn run(&self, token: &str) -> BotResult<()> {
        let result = self.start(token).await;
        self.lifecycle.stop();
        result
    }

    /// Resolves and registers every configured extension.
    ///
    /// Only allowed once, from [`ClientState::Constructed`]. [`run`](Self::run)
    /// fails if extensions were already loaded this way.
    pub fn load(&self) -> BotResult<(ExtensionHost, LoadReport)> {
        self.lifecycle.advance(ClientState::ExtensionsLoading)?;
        Ok(load_extensions(&self.extensions, &self.table))
    }

    async fn start(&self, token: &str) -> BotResult<()> {
        let (host, _report) = self.load()?;
        let (commands, cogs) = host.into_parts();

        self.lifecycle.advance(ClientState::GatewayWarming)?;
        let http = build_http(token, build_http_client(&self.transport)?);
        warm_gateway(&http, self.transport.gateway_timeout())
            .instrument(self.logging.client_span())
            .await?;

        self.sync(&http, &commands).await?;

        let data = Data { cogs };
        let framework = poise::Framework::builder()
            .options(framework_options(commands))
            .setup(move |_ctx, _ready, _framework| Box::pin(async move { Ok(data) }))
            .build();

        let mut client = serenity::ClientBuilder::new_with_http(http, serenity::GatewayIntents::all())
            .framework(framework)
            .await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, shutting down");
                shard_manager.shutdown_all().await;
            }
        });

        self.lifecycle.advance(ClientState::Running)?;
        client.start().instrument(self.logging.client_span()).await?;
        Ok(())
    }

    /// Syncs `commands` and moves on to [`ClientState::Ready`].
    ///
    /// A failed sync is logged and does not stop startup.
    async fn sync(&self, http: &serenity::Http, commands: &[Command]) -> BotResult<()> {
        self.lifecycle.advance(ClientState::CommandSyncing)?;
        match sync_commands(http, commands, self.transport.sync_timeout())
            .instrument(self.logging.client_span())
            .await
        {
            Ok(count) => info!("[success] Successfully synced {} commands", count),
            Err(e) => error!("[failed] Sync failed: {:?}", e),
        }

        self.lifecycle.advance(ClientState::Ready)?;
        log_tree_summary(&summarize_tree(&CommandNode::from_commands(commands)));
        Ok(())
    }
}

/// Overwrites the global application commands with `commands`.
///
/// `timeout` bounds the whole exchange, application lookup included.
/// Returns the number of commands Discord now holds.
async fn sync_commands(
    http: &serenity::Http,
    commands: &[Command],
    timeout: Duration,
) -> BotResult<usize> {
    let builders = poise::builtins::create_application_commands(commands);

    tokio::time::timeout(timeout, async {
        let application = http.get_current_application_info().await?;
        http.set_application_id(application.id);

        let synced = serenity::Command::set_global_commands(http, builders).await?;
        Ok::<_, BotError>(synced.len())
    })
    .await
    .map_err(|_| BotError::Timeout("command sync"))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::unresponsive_http;
    use nightcore_commands::features::meta::commands::ping;
    use nightcore_common::test_utils::capture_logs;
    use nightcore_common::LoggingConfig;

    fn logging() -> &'static LoggingContext {
        LoggingContext::init(LoggingConfig {
            ansi: false,
            ..LoggingConfig::default()
        })
    }

    #[tokio::test]
    async fn test_sync_timeout_covers_application_lookup() {
        let http = unresponsive_http(&TransportConfig::default()).await;

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            sync_commands(&http, &[], Duration::from_millis(100)),
        )
        .await
        .expect("sync should give up on its own");

        assert!(matches!(outcome, Err(BotError::Timeout("command sync"))));
    }

    #[test]
    fn test_failed_sync_still_reaches_ready() {
        let transport = TransportConfig {
            sync_timeout_secs: 1,
            ..TransportConfig::default()
        };
        let bot = NightcoreBot::new(
            vec![ExtensionId::new(ping::EXTENSION_ID)],
            ExtensionTable::builtin(),
            transport.clone(),
            logging(),
        );

        let (result, output) = capture_logs(|| {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let http = unresponsive_http(&transport).await;
                    let (host, _report) = bot.load().unwrap();
                    bot.lifecycle.advance(ClientState::GatewayWarming).unwrap();
                    bot.sync(&http, host.commands()).await
                })
        });

        assert!(result.is_ok());
        assert_eq!(bot.state(), ClientState::Ready);
        assert!(output.contains("[failed] Sync failed: Timeout(\"command sync\")"));
        assert!(output.contains("Slash tree summary: top_level_total=1 leaf_overall=1"));
    }
}
