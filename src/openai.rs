//! OpenAI client configuration with sensible defaults.

use crate::config::Settings;
use crate::error::{Result, TutorError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Create an OpenAI client from settings.
///
/// Uses the configured API key when present, otherwise falls back to
/// `OPENAI_API_KEY` as read by `async-openai` itself.
pub fn create_client(settings: &Settings) -> Result<Client<OpenAIConfig>> {
    let mut config = OpenAIConfig::default();
    if let Some(key) = settings.openai.api_key.as_deref().filter(|k| !k.is_empty()) {
        config = config.with_api_key(key);
    }

    create_client_with_timeout(config, settings.openai_timeout())
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TutorError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
