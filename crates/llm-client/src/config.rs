//! Configuration for the LLM gateway client.
//!
//! The configuration is read from the environment once at startup and passed
//! into [`crate::LlmClient`] explicitly; nothing in this crate touches the
//! environment at request time.

use std::env;

/// Environment variable for the gateway base URL
const BASE_URL_ENV: &str = "LLM_BASE_URL";

/// Environment variable for the gateway API key
const API_KEY_ENV: &str = "LLM_API_KEY";

/// Environment variable for the default model
const MODEL_ENV: &str = "LLM_MODEL";

/// Default OpenAI-compatible endpoint
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for calorie estimation and research
const DEFAULT_MODEL: &str = "gpt-4.1";

/// Connection settings for the OpenAI-compatible LLM gateway
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the gateway, without the endpoint path
    pub base_url: String,
    /// API key; `None` means the gateway is unconfigured and every call
    /// degrades gracefully instead of erroring at startup
    pub api_key: Option<String>,
    /// Default model identifier
    pub model: String,
}

impl LlmConfig {
    /// Build configuration from the environment.
    ///
    /// Reads `LLM_BASE_URL`, `LLM_API_KEY`, and `LLM_MODEL`. A missing or
    /// empty API key leaves `api_key` as `None` — the process still starts
    /// and provider calls report `Unavailable` instead of crashing.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            model: env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_key() {
        let config = LlmConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
