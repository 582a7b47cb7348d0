use alerter::updates::{BotCommand, parse_command};
use alerter::{Notifier, TelegramAlerter, escape_markdown};
use api_client::BybitClient;
use configuration::load_settings;
use monitor::{MonitorController, RsiMonitor, StartOutcome, StopOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// How long each `getUpdates` call may hang waiting for a command.
const POLL_TIMEOUT_SECS: u64 = 30;

/// The main entry point for the vigil monitoring bot.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = load_settings()?;

    let client = Arc::new(BybitClient::new(&settings.exchange));
    let alerter = Arc::new(TelegramAlerter::new(&settings.telegram)?);

    let monitor = RsiMonitor::new(
        client,
        Arc::clone(&alerter) as Arc<dyn Notifier>,
        settings.monitor.clone(),
    )?;
    let controller = MonitorController::new(monitor);

    tracing::info!("Bot is up. Send /start to begin monitoring.");

    tokio::select! {
        _ = run_command_loop(&alerter, &controller) => {}
        _ = tokio::signal::ctrl_c() => {
            controller.stop().await;
            tracing::info!("Bot stopped by user.");
        }
    }

    Ok(())
}

/// The bot's command surface: long-polls Telegram for `/start` and `/stop`,
/// drives the monitor controller, and acknowledges every command in the chat
/// it came from.
async fn run_command_loop(alerter: &TelegramAlerter, controller: &MonitorController) {
    let mut offset = 0i64;

    loop {
        let updates = match alerter.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!(error = ?e, "Polling for commands failed. Retrying shortly.");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let message = match update.message {
                Some(message) => message,
                None => continue,
            };
            let command = match message.text.as_deref().and_then(parse_command) {
                Some(command) => command,
                None => continue,
            };

            let reply = match command {
                BotCommand::Start => match controller.start().await {
                    StartOutcome::Started => "🚀 Starting RSI monitoring...",
                    StartOutcome::AlreadyRunning => "✅ Bot is already running.",
                },
                BotCommand::Stop => match controller.stop().await {
                    StopOutcome::Stopping => "🛑 Stopping RSI monitoring...",
                    StopOutcome::AlreadyStopped => "✅ Bot is already stopped.",
                },
            };

            let chat_id = message.chat.id.to_string();
            if let Err(e) = alerter.send_to(&chat_id, &escape_markdown(reply)).await {
                tracing::error!(error = ?e, "Failed to acknowledge command.");
            }
        }
    }
}
