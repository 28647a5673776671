//! Telegram Bot API notifier.
//!
//! Messages go to a single chat through `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::Notifier;
use crate::config::Settings;
use crate::error::{ClientBuildError, NotifyError};

/// Default Bot API base URL.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Notifier posting to a Telegram chat.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a new builder for configuring the notifier.
    pub fn builder() -> TelegramNotifierBuilder {
        TelegramNotifierBuilder::default()
    }

    /// Create a notifier from process settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientBuildError> {
        Self::builder()
            .api_url(&settings.telegram_api_url)
            .token(&settings.telegram_token)
            .chat_id(&settings.telegram_chat_id)
            .timeout(settings.request_timeout)
            .build()
    }

    /// The destination chat.
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Send `text` to the configured chat.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        // The token is part of the path; errors are stripped of the URL below.
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);

        let response = self
            .client
            .post(&url)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // The Bot API can answer 200 with `ok: false`.
        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| NotifyError::Decode(e.without_url().to_string()))?;
        if !reply.ok {
            return Err(NotifyError::Rejected(
                reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> bool {
        info!(chat_id = %self.chat_id, text = message, "Sending message");

        match self.send(message).await {
            Ok(()) => {
                debug!(chat_id = %self.chat_id, text = message, "Message delivered");
                true
            }
            Err(e) => {
                error!(chat_id = %self.chat_id, error = %e, "Failed to send message");
                false
            }
        }
    }
}

/// Builder for TelegramNotifier.
#[derive(Debug, Default)]
pub struct TelegramNotifierBuilder {
    api_url: Option<String>,
    token: Option<String>,
    chat_id: Option<String>,
    timeout: Option<Duration>,
}

impl TelegramNotifierBuilder {
    /// Set the Bot API base URL (default: [`DEFAULT_API_URL`]).
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Set the bot token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the destination chat identifier.
    pub fn chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the notifier.
    pub fn build(self) -> Result<TelegramNotifier, ClientBuildError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(TelegramNotifier {
            client,
            api_url: self
                .api_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: self.token.unwrap_or_default(),
            chat_id: self.chat_id.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    fn notifier_for(server: &MockServer) -> TelegramNotifier {
        TelegramNotifier::builder()
            .api_url(server.base_url())
            .token("123:abc")
            .chat_id("42")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let notifier = TelegramNotifier::builder().build().unwrap();
        assert_eq!(notifier.api_url, DEFAULT_API_URL);
        assert_eq!(notifier.chat_id(), "");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let notifier = TelegramNotifier::builder()
            .api_url("http://localhost:8081/")
            .build()
            .unwrap();
        assert_eq!(notifier.api_url, "http://localhost:8081");
    }

    #[tokio::test]
    async fn test_notify_delivers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/bot123:abc/sendMessage")
                    .json_body(json!({ "chat_id": "42", "text": "hello" }));
                then.status(200)
                    .json_body(json!({ "ok": true, "result": { "message_id": 1 } }));
            })
            .await;

        assert!(notifier_for(&server).notify("hello").await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_notify_reports_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/bot123:abc/sendMessage");
                then.status(200)
                    .json_body(json!({ "ok": false, "description": "chat not found" }));
            })
            .await;

        let notifier = notifier_for(&server);
        match notifier.send("hello").await {
            Err(NotifyError::Rejected(description)) => assert_eq!(description, "chat not found"),
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert!(!notifier.notify("hello").await);
    }

    #[tokio::test]
    async fn test_notify_reports_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/bot123:abc/sendMessage");
                then.status(401).body(r#"{"ok":false,"description":"Unauthorized"}"#);
            })
            .await;

        let notifier = notifier_for(&server);
        assert!(matches!(
            notifier.send("hello").await,
            Err(NotifyError::Status { status: 401, .. })
        ));
        assert!(!notifier.notify("hello").await);
    }

    #[tokio::test]
    async fn test_notify_reports_unparsable_reply() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/bot123:abc/sendMessage");
                then.status(200).body("<html>gateway</html>");
            })
            .await;

        let notifier = notifier_for(&server);
        match notifier.send("hello").await {
            Err(err @ NotifyError::Decode(_)) => assert!(!err.to_string().contains("123:abc")),
            other => panic!("expected Decode, got {:?}", other),
        }
        assert!(!notifier.notify("hello").await);
    }

    #[tokio::test]
    async fn test_notify_connection_refused() {
        let notifier = TelegramNotifier::builder()
            .api_url("http://127.0.0.1:1")
            .token("t")
            .chat_id("1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        assert!(!notifier.notify("hello").await);
    }
}
