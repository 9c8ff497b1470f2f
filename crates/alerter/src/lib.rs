use crate::error::AlerterError;
use configuration::TelegramConfig;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub mod error;

/// The JSON payload for the Telegram `sendMessage` endpoint.
///
/// The report is sent as plain text; no parse mode, so nothing needs escaping.
#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
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
    /// Returns `None` if the token or chat_id is missing from the
    /// configuration: the tracker still runs and logs its report, it just has
    /// nowhere to deliver it.
    pub fn new(config: &TelegramConfig) -> Option<Self> {
        if config.token.is_empty() || config.chat_id.is_empty() {
            tracing::warn!("Telegram alerter is not configured (missing token or chat_id); reports will only be logged.");
            return None;
        }
        Some(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .expect("Failed to build reqwest client"),
            token: config.token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    /// Sends a text message to the configured Telegram chat.
    pub async fn send_message(&self, message: &str) -> Result<(), AlerterError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);

        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text: message,
        };

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to decode error response".to_string());
            return Err(AlerterError::ApiError(error_text));
        }

        Ok(())
    }
}

/// Delivers `message` on a best-effort basis.
///
/// The notification contract is one-way: a delivery failure is logged and
/// swallowed, never propagated to the caller.
pub async fn notify(alerter: &Option<TelegramAlerter>, message: &str) {
    let Some(alerter) = alerter else { return };
    if let Err(e) = alerter.send_message(message).await {
        tracing::error!(error = ?e, "Failed to send Telegram notification.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_disable_the_alerter() {
        let config = TelegramConfig::default();
        assert!(TelegramAlerter::new(&config).is_none());

        let half_configured = TelegramConfig {
            token: "123:abc".to_string(),
            chat_id: String::new(),
        };
        assert!(TelegramAlerter::new(&half_configured).is_none());
    }

    #[tokio::test]
    async fn notify_is_a_no_op_without_an_alerter() {
        // Must return, not panic or error.
        notify(&None, "anything").await;
    }
}
