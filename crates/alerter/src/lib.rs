use crate::error::AlerterError;
use async_trait::async_trait;
use configuration::TelegramConfig;
use core_types::Alert;
use reqwest::Client;
use serde::Serialize;

pub mod error;
pub mod updates;

/// The JSON payload for the Telegram `sendMessage` endpoint.
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str, // To allow for formatting like bold, italics etc.
}

/// The generic interface for delivering alerts. This trait is the contract
/// the monitoring loop works against, allowing the delivery channel (live or
/// mock) to be swapped out.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &Alert) -> Result<(), AlerterError>;
}

/// A client for sending messages to the Telegram Bot API.
pub struct TelegramAlerter {
    client: Client,
    token: String,
    chat_id: String,
}

impl TelegramAlerter {
    /// Creates a new `TelegramAlerter`.
    ///
    /// Returns an error if the token or chat_id is missing from the
    /// configuration. The bot takes its commands over Telegram, so it cannot
    /// run without them.
    pub fn new(config: &TelegramConfig) -> Result<Self, AlerterError> {
        if config.token.is_empty() || config.chat_id.is_empty() {
            return Err(AlerterError::NotConfigured);
        }
        Ok(Self {
            client: Client::new(),
            token: config.token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    /// Sends a text message to the configured Telegram chat.
    pub async fn send_message(&self, message: &str) -> Result<(), AlerterError> {
        self.send_to(&self.chat_id, message).await
    }

    /// Sends a text message to an arbitrary chat. Command acknowledgements go
    /// back to the chat the command came from.
    pub async fn send_to(&self, chat_id: &str, message: &str) -> Result<(), AlerterError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);

        let payload = SendMessagePayload {
            chat_id,
            text: message,
            parse_mode: "MarkdownV2", // Use Markdown for rich formatting
        };

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(AlerterError::ApiError(error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramAlerter {
    async fn notify(&self, alert: &Alert) -> Result<(), AlerterError> {
        self.send_message(&alert_message(alert)).await
    }
}

/// Renders an alert as a MarkdownV2 message, e.g.
/// `🚨 *Overbought Signal (Short):*` followed by `BTC/USDT:USDT: RSI 71.42`.
pub fn alert_message(alert: &Alert) -> String {
    format!(
        "🚨 *{}:*\n{}: RSI {}",
        escape_markdown(alert.kind.title()),
        escape_markdown(&alert.symbol),
        escape_markdown(&format!("{:.2}", alert.value)),
    )
}

/// A helper function to escape characters that have special meaning in Telegram's MarkdownV2.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = r"_*[]()~`>#+-=|{}.!";
    special_chars.chars().fold(text.to_string(), |s, c| s.replace(c, &format!("\\{}", c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::AlertKind;

    #[test]
    fn escapes_markdown_v2_special_characters() {
        assert_eq!(escape_markdown("RSI 71.42"), "RSI 71\\.42");
        assert_eq!(escape_markdown("a_b*c!"), "a\\_b\\*c\\!");
        assert_eq!(escape_markdown("BTC/USDT:USDT"), "BTC/USDT:USDT");
    }

    #[test]
    fn renders_overbought_alerts() {
        let alert = Alert {
            kind: AlertKind::Short,
            symbol: "BTC/USDT:USDT".to_string(),
            value: 71.424,
        };
        assert_eq!(
            alert_message(&alert),
            "🚨 *Overbought Signal \\(Short\\):*\nBTC/USDT:USDT: RSI 71\\.42"
        );
    }

    #[test]
    fn renders_oversold_alerts() {
        let alert = Alert {
            kind: AlertKind::Buy,
            symbol: "ETH/USDT:USDT".to_string(),
            value: 25.0,
        };
        assert_eq!(
            alert_message(&alert),
            "🚨 *Oversold Signal \\(Buy\\):*\nETH/USDT:USDT: RSI 25\\.00"
        );
    }

    #[test]
    fn refuses_to_build_without_credentials() {
        let config = TelegramConfig {
            token: String::new(),
            chat_id: String::new(),
        };
        assert!(matches!(
            TelegramAlerter::new(&config),
            Err(AlerterError::NotConfigured)
        ));
    }
}
