//! HTTP transport for the chat-completions endpoint.
//!
//! The trait seam lets tests drive the client with a scripted transport; the
//! real implementation performs exactly one POST per call, with no retries
//! and no timeout beyond what the connection itself imposes.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{error, warn};

use crate::core::config::AppConfig;
use crate::core::models::ChatPayload;
use crate::errors::KreatorError;

use super::classify::{ProviderErrorBody, classify_api_error};

/// Successful chat-completions response. Every level defaults so that a 2xx
/// body of an unexpected (but valid JSON) shape degrades to "no content",
/// which the parsing layer reports as an invalid response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Executes one chat-completions call. Errors crossing this boundary are
/// already classified; callers propagate them unchanged.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn execute(
        &self,
        operation: &str,
        payload: &ChatPayload,
        api_key: &str,
    ) -> Result<ChatCompletion, KreatorError>;
}

/// reqwest-backed transport. The HTTP client is built once and reused.
pub struct HttpChatTransport {
    http: Client,
    endpoint: String,
    referer: String,
    title: String,
}

impl HttpChatTransport {
    /// # Errors
    ///
    /// Returns a config error when the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &AppConfig) -> Result<Self, KreatorError> {
        let http = Client::builder()
            .build()
            .map_err(|e| KreatorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/chat/completions",
                config.openrouter_base_url.trim_end_matches('/')
            ),
            referer: config.app_referer.clone(),
            title: config.app_title.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn execute(
        &self,
        operation: &str,
        payload: &ChatPayload,
        api_key: &str,
    ) -> Result<ChatCompletion, KreatorError> {
        #[cfg(feature = "debug-logs")]
        tracing::info!(
            "{operation} request payload:\n{}",
            serde_json::to_string_pretty(payload).unwrap_or_default()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("{operation}: request failed: {e}");
                KreatorError::Network {
                    operation: operation.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: ProviderErrorBody = serde_json::from_str(&body).unwrap_or_default();
            warn!("{operation}: provider returned {status}: {body}");
            return Err(classify_api_error(operation, status, &parsed));
        }

        // A body that is not JSON at all counts as a connection-level
        // failure; valid JSON of the wrong shape becomes an empty completion
        // and is rejected as an invalid response downstream.
        let value: serde_json::Value = response.json().await.map_err(|e| {
            error!("{operation}: unreadable response body: {e}");
            KreatorError::Network {
                operation: operation.to_string(),
            }
        })?;

        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("{operation}: unexpected response shape: {e}");
            ChatCompletion::default()
        }))
    }
}
