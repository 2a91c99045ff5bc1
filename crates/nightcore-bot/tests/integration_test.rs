//! Integration tests for nightcore-bot crate.
//!
//! These tests assemble the client from runtime configuration and drive the
//! parts of the startup sequence that do not need a Discord connection.

use nightcore_bot::{create_bot, BotError, ClientState};
use nightcore_commands::features::meta::commands::ping;
use nightcore_common::test_utils::{capture_logs, count_level};
use nightcore_common::{ExtensionId, LoggingConfig, LoggingContext};
use nightcore_config::{RuntimeConfig, TransportConfig};
use tracing::Level;

fn logging() -> &'static LoggingContext {
    LoggingContext::init(LoggingConfig {
        ansi: false,
        ..LoggingConfig::default()
    })
}

#[test]
fn test_default_bot_loads_ping() {
    let bot = create_bot(&RuntimeConfig::default(), logging());

    assert_eq!(bot.extensions(), [ExtensionId::new(ping::EXTENSION_ID)]);
    assert_eq!(bot.transport(), &TransportConfig::default());
    assert_eq!(bot.state(), ClientState::Constructed);

    let (host, report) = bot.load().unwrap();
    assert!(report.is_complete());
    assert_eq!(host.cogs(), ["Ping".to_string()]);
    assert_eq!(bot.state(), ClientState::ExtensionsLoading);
}

#[test]
fn test_disabled_meta_leaves_nothing_to_load() {
    let mut runtime = RuntimeConfig::default();
    runtime.extensions = runtime.extensions.with_feature("meta", false);
    let bot = create_bot(&runtime, logging());

    assert!(bot.extensions().is_empty());

    let ((host, report), output) = capture_logs(|| bot.load().unwrap());
    assert!(host.commands().is_empty());
    assert!(report.loaded.is_empty());
    assert_eq!(count_level(&output, Level::WARN), 1);
    assert!(output.contains("No cogs to load"));
}

#[test]
fn test_transport_options_reach_the_bot() {
    let runtime = RuntimeConfig::from_toml_str("[transport]\npool_limit = 8\n").unwrap();
    let bot = create_bot(&runtime, logging());

    assert_eq!(bot.transport().pool_limit, 8);
    assert_eq!(bot.transport().dns_cache_ttl_secs, 300);
}

#[tokio::test]
async fn test_failed_startup_ends_stopped() {
    let mut runtime = RuntimeConfig::default();
    runtime.transport.gateway_timeout_secs = 0;
    let bot = create_bot(&runtime, logging());

    let result = bot.run("not-a-token").await;

    assert!(result.is_err());
    assert_eq!(bot.state(), ClientState::Stopped);
}

#[tokio::test]
async fn test_run_after_manual_load_is_rejected() {
    let bot = create_bot(&RuntimeConfig::default(), logging());
    bot.load().unwrap();

    let result = bot.run("not-a-token").await;

    assert!(matches!(
        result,
        Err(BotError::InvalidState {
            from: ClientState::ExtensionsLoading,
            to: ClientState::ExtensionsLoading,
        })
    ));
    assert_eq!(bot.state(), ClientState::Stopped);
}
