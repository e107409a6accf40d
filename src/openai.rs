//! OpenAI-compatible client configuration with sensible defaults.

use crate::config::AnswerSettings;
use crate::error::{AsktubeError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Resolve the API key from the configured environment variable.
///
/// Read once at startup so a missing credential surfaces before any
/// question is asked.
pub fn resolve_api_key(settings: &AnswerSettings) -> Result<String> {
    match std::env::var(&settings.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        Ok(_) => Err(AsktubeError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            settings.api_key_env, settings.api_key_env
        ))),
        Err(_) => Err(AsktubeError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            settings.api_key_env, settings.api_key_env
        ))),
    }
}

/// Create a chat-completions client for the configured endpoint.
///
/// Uses the configured request timeout to prevent hung API calls, and the
/// configured base URL when one is set (e.g. Google's OpenAI-compatible
/// endpoint for Gemini models).
pub fn create_client(settings: &AnswerSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = resolve_api_key(settings)?;

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()
        .expect("Failed to create HTTP client");

    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = &settings.api_base {
        config = config.with_api_base(base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}
