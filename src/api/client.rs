//! HTTP client for the Practicum homework status endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use homework_watch::api::{PracticumClient, StatusApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PracticumClient::builder().token("secret").build()?;
//!
//!     let response = client.fetch(0).await?;
//!     println!("{}", response);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use super::StatusApi;
use crate::config::Settings;
use crate::error::{ClientBuildError, PollError};

/// Default status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Client for the homework status API.
#[derive(Debug, Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> PracticumClientBuilder {
        PracticumClientBuilder::default()
    }

    /// Create a client from process settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientBuildError> {
        Self::builder()
            .endpoint(&settings.endpoint)
            .token(&settings.practicum_token)
            .timeout(settings.request_timeout)
            .build()
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusApi for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, PollError> {
        info!(endpoint = %self.endpoint, from_date = cursor, "Sending request to status API");

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(|source| {
                error!(endpoint = %self.endpoint, error = %source, "Failed to reach status API");
                PollError::Transport {
                    endpoint: self.endpoint.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown").to_string();
            let body = response.text().await.unwrap_or_default();
            error!(
                endpoint = %self.endpoint,
                from_date = cursor,
                status = status.as_u16(),
                reason = %reason,
                body = %body,
                "Status API returned an error"
            );
            return Err(PollError::ResponseStatus {
                status: status.as_u16(),
                reason,
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PollError::Decode(e.to_string()))?;

        debug!(endpoint = %self.endpoint, from_date = cursor, "Status API request succeeded");
        Ok(body)
    }
}

/// Builder for PracticumClient.
#[derive(Debug, Default)]
pub struct PracticumClientBuilder {
    endpoint: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
}

impl PracticumClientBuilder {
    /// Set the status endpoint (default: [`DEFAULT_ENDPOINT`]).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the OAuth token sent in the `Authorization` header.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PracticumClient, ClientBuildError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder().timeout(timeout).build()?;

        Ok(PracticumClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token: self.token.unwrap_or_default(),
        })
    }
}
