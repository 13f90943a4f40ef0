use super::{Formatter, Sink, SinkError};
use crate::config::DEFAULT_TIMEOUT;
use crate::domain::Entry;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Hosted Bot API endpoint. Overridable for tests and self-hosted servers.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_ids: Vec<i64>,
    pub api_base: String,
    pub timeout: Duration,
    pub disable_notification: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_ids: Vec::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            disable_notification: false,
        }
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    disable_notification: bool,
}

/// Error shape of a failed Bot API call; unknown fields are ignored.
#[derive(Deserialize)]
struct ApiError {
    description: Option<String>,
}

/// Delivers messages through the Telegram Bot API `sendMessage` method,
/// fanning each text out to every configured chat.
#[derive(Clone)]
pub struct TelegramSink {
    client: Client,
    send_url: Url,
    chat_ids: Vec<i64>,
    disable_notification: bool,
    formatter: Formatter,
}

impl TelegramSink {
    pub fn new(config: TelegramConfig, formatter: Formatter) -> Result<Self, SinkError> {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_base.trim_end_matches('/'),
            config.token
        )
        .parse::<Url>()
        .map_err(|e| SinkError::InvalidConfiguration(format!("invalid API URL: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SinkError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            send_url,
            chat_ids: config.chat_ids,
            disable_notification: config.disable_notification,
            formatter,
        })
    }

    /// One `sendMessage` call per configured chat; the first failure aborts
    /// the fan-out and is returned.
    async fn deliver(&self, text: &str) -> Result<(), SinkError> {
        for &chat_id in &self.chat_ids {
            let body = SendMessageRequest {
                chat_id,
                text,
                disable_notification: self.disable_notification,
            };

            let response = self
                .client
                .post(self.send_url.clone())
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&raw)
                    .ok()
                    .and_then(|e| e.description)
                    .unwrap_or(raw);
                return Err(SinkError::Http {
                    status: status.as_u16(),
                    message,
                });
            }
        }
        Ok(())
    }
}

impl Sink for TelegramSink {
    fn format(&self, entry: &Entry) -> String {
        (self.formatter)(entry)
    }

    async fn send_one(&self, entry: &Entry) -> Result<(), SinkError> {
        let text = self.format(entry);
        self.deliver(&text).await
    }

    async fn send_batch(&self, text: &str) -> Result<(), SinkError> {
        self.deliver(text).await
    }
}
