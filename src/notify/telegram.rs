//! Telegram Bot API sink.

use super::{NotificationSink, NotifyError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

// A hung delivery must not stall the polling loop.
const SEND_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Sends reports to a fixed list of Telegram chats via the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramSink {
    client: Client,
    api_base: String,
    bot_token: String,
    recipients: Vec<i64>,
}

impl TelegramSink {
    pub fn new(bot_token: String, recipients: Vec<i64>) -> Self {
        Self {
            client: Client::new(),
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token,
            recipients,
        }
    }

    /// Point the sink at a different API host. Used by tests.
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }

    async fn send_to_chat(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.send_message_url())
            .timeout(SEND_TIMEOUT)
            .json(&message_payload(chat_id, text))
            .send()
            .await
            .map_err(|e| NotifyError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api(format!("status {}: {}", status, body)));
        }

        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Api(e.to_string()))?;
        if !envelope.ok {
            return Err(NotifyError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }
        Ok(())
    }
}

/// The Bot API response envelope; only the status fields matter here.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// The sendMessage payload: Markdown formatting, one chat per call.
fn message_payload(chat_id: i64, text: &str) -> Value {
    json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "Markdown",
    })
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        if self.recipients.is_empty() {
            debug!("no notification recipients configured");
            return Ok(());
        }

        let mut delivered = 0usize;
        for chat_id in &self.recipients {
            match self.send_to_chat(*chat_id, text).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(chat_id, "telegram delivery failed: {}", e),
            }
        }

        if delivered == 0 {
            return Err(NotifyError::AllRecipientsFailed(self.recipients.len()));
        }
        debug!(
            delivered,
            recipients = self.recipients.len(),
            "report delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_payload_is_markdown() {
        let payload = message_payload(42, "📊 *PnL Report*");
        assert_eq!(payload["chat_id"], 42);
        assert_eq!(payload["text"], "📊 *PnL Report*");
        assert_eq!(payload["parse_mode"], "Markdown");
    }

    #[test]
    fn test_send_message_url_embeds_token() {
        let sink = TelegramSink::new("123:abc".to_string(), vec![]);
        assert_eq!(
            sink.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[tokio::test]
    async fn test_empty_recipient_list_is_a_no_op() {
        // Points at an unroutable host; must not be contacted.
        let sink = TelegramSink::new("123:abc".to_string(), vec![])
            .with_api_base("http://127.0.0.1:1".to_string());
        assert!(sink.send("report").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_api_reports_all_failed() {
        let sink = TelegramSink::new("123:abc".to_string(), vec![1, 2])
            .with_api_base("http://127.0.0.1:1".to_string());
        match sink.send("report").await {
            Err(NotifyError::AllRecipientsFailed(2)) => {}
            other => panic!("expected AllRecipientsFailed(2), got {:?}", other),
        }
    }
}
