//! Main entry point for Nightcore Bot.

use nightcore_bot::create_bot;
use nightcore_common::{LoggingConfig, LoggingContext, NightcoreError};
use nightcore_config::GlobalConfig;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let logging = LoggingContext::init(LoggingConfig::default());

    info!("Starting bot...");
    let config = GlobalConfig::global();
    info!(
        "Loading environment variables from: {}",
        config.env_path().display()
    );

    let result = run(config, logging).await;
    if let Err(e) = &result {
        error!("Error occurred: {}", e);
    }
    info!("Bot has been stopped.");

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(config: &GlobalConfig, logging: &'static LoggingContext) -> Result<(), NightcoreError> {
    let settings = config.bot()?;
    let runtime = config.runtime()?;

    let bot = create_bot(runtime, logging);
    bot.run(&settings.bot_token).await?;
    Ok(())
}
