//! HTTP transport for the OpenAI-compatible LLM gateway.
//!
//! One endpoint matters here: `POST {base_url}/chat/completions`. The
//! gateway also accepts an `mcp_servers` extension field naming external
//! tool servers to enable for a request; the research path forwards it,
//! the calorie path never sets it.

use crate::config::LlmConfig;
use crate::error::ProviderError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection timeout for the gateway
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request timeout; completions can be slow
const REQUEST_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    /// Gateway extension: identifiers of MCP tool servers to enable
    #[serde(skip_serializing_if = "Option::is_none")]
    mcp_servers: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the LLM gateway.
///
/// Wraps a `reqwest::Client` with the gateway's auth and wire format and
/// exposes the two calls the rest of the system needs: calorie estimation
/// (see `calories` module) and free-text research.
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
}

impl LlmClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: LlmConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment configuration.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(LlmConfig::from_env())
    }

    /// Whether an API key is configured. Without one, every call returns
    /// `ProviderError::Unavailable` without touching the network.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Run a free-text research query, optionally overriding the model and
    /// enabling MCP tool servers on the gateway side.
    pub async fn research(
        &self,
        query: &str,
        model: Option<&str>,
        mcp_servers: Option<&[String]>,
    ) -> Result<String, ProviderError> {
        self.complete(query, model, mcp_servers).await
    }

    /// One chat-completion round trip. Returns the assistant's text.
    pub(crate) async fn complete(
        &self,
        prompt: &str,
        model: Option<&str>,
        mcp_servers: Option<&[String]>,
    ) -> Result<String, ProviderError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ProviderError::Unavailable(
                "no API key configured".to_string(),
            ));
        };

        let model = model.unwrap_or(&self.config.model);
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            mcp_servers,
        };

        debug!(
            "Sending completion request: model={}, prompt_len={}",
            model,
            prompt.len()
        );

        let response = self
            .http
            .post(self.api_url("chat/completions"))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            warn!("Gateway returned {}: {}", status, message);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Parse("response contained no choices".to_string()))
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }
}
