use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::NotifyError;

pub const API_URL: &str = "https://api.telegram.org";

/// Anything that can deliver a text message to the user.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: Client,
    base_url: String,
}

impl TelegramNotifier {
    /// Create a notifier for the Bot API at `base_url`; the public host is [`API_URL`].
    pub fn with_base_url(
        token: String,
        chat_id: String,
        base_url: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            chat_id,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(NotifyError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let reply = response.json::<BotApiReply>().await?;
        if !reply.ok {
            return Err(NotifyError::Rejected(
                reply.description.unwrap_or_else(|| "no description".into()),
            ));
        }

        info!(chat_id = %self.chat_id, "message sent to chat");
        Ok(())
    }
}
