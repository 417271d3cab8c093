use std::sync::Arc;

use futures::StreamExt;
use secrecy::ExposeSecret;

use shiftlog::channels::{Channel, TelegramChannel};
use shiftlog::config::BotConfig;
use shiftlog::processor::MessageProcessor;
use shiftlog::report::vocabulary;
use shiftlog::sheets::{RowSink, SheetsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Missing or malformed configuration must stop the process here,
    // before anything touches the network.
    let config = BotConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    eprintln!("📋 shiftlog v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Spreadsheet: {}", config.spreadsheet_id);
    eprintln!("   Routes: {}", config.registry.len());
    eprintln!("   Time zone: {}\n", config.timezone);

    let sink: Arc<dyn RowSink> = Arc::new(SheetsClient::new(
        config.service_account,
        config.spreadsheet_id.clone(),
    ));

    // One best-effort header repair at startup; rows still append under a
    // stale header if this fails.
    if let Err(e) = sink.ensure_header(&vocabulary::HEADER).await {
        tracing::warn!(error = %e, "Could not verify or repair the sheet header");
    }

    let channel = TelegramChannel::new(config.bot_token.expose_secret().to_string());
    let processor = MessageProcessor::new(config.registry, Arc::clone(&sink), config.timezone);

    let mut messages = channel.start().await?;
    while let Some(msg) = messages.next().await {
        processor.process(&msg, &channel).await;
    }

    Ok(())
}
