use crate::TelegramAlerter;
use crate::error::AlerterError;
use serde::Deserialize;

/// The envelope the Bot API wraps every `getUpdates` response in.
#[derive(Debug, Deserialize)]
struct GetUpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

/// A single entry from the `getUpdates` long poll.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub text: Option<String>,
    pub chat: Chat,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The two commands the bot reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Stop,
}

/// Parses the command out of a message text, tolerating the `@BotName`
/// suffix Telegram appends in group chats.
pub fn parse_command(text: &str) -> Option<BotCommand> {
    let first = text.split_whitespace().next()?;
    let command = match first.split_once('@') {
        Some((command, _)) => command,
        None => first,
    };

    if command.eq_ignore_ascii_case("/start") {
        Some(BotCommand::Start)
    } else if command.eq_ignore_ascii_case("/stop") {
        Some(BotCommand::Stop)
    } else {
        None
    }
}

impl TelegramAlerter {
    /// Long-polls the Bot API for new updates. `offset` should be one past
    /// the highest `update_id` already handled.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, AlerterError> {
        let url = format!("https://api.telegram.org/bot{}/getUpdates", self.token);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(AlerterError::ApiError(error_text));
        }

        let batch: GetUpdatesResponse = response.json().await?;
        if !batch.ok {
            return Err(AlerterError::ApiError("getUpdates returned ok=false".to_string()));
        }

        Ok(batch.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_and_stop_commands() {
        assert_eq!(parse_command("/start"), Some(BotCommand::Start));
        assert_eq!(parse_command("/STOP"), Some(BotCommand::Stop));
        assert_eq!(parse_command("/start@SomeBot"), Some(BotCommand::Start));
        assert_eq!(parse_command("/stop now please"), Some(BotCommand::Stop));
        assert_eq!(parse_command("start"), None);
        assert_eq!(parse_command("/status"), None);
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn deserializes_update_batches() {
        let batch: GetUpdatesResponse = serde_json::from_str(
            r#"{
                "ok": true,
                "result": [
                    {
                        "update_id": 857,
                        "message": {
                            "message_id": 1,
                            "text": "/start",
                            "chat": {"id": 42, "type": "private"}
                        }
                    },
                    {"update_id": 858}
                ]
            }"#,
        )
        .unwrap();

        assert!(batch.ok);
        assert_eq!(batch.result.len(), 2);
        let message = batch.result[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/start"));
        assert!(batch.result[1].message.is_none());
    }
}
