//! Answer generation against an OpenAI-compatible chat API.
//!
//! One atomic request per question; no streaming, no retries. API failures
//! are classified into the [`AnswerError`] taxonomy and surface verbatim.

use crate::config::AnswerSettings;
use crate::error::AnswerError;
use crate::prompt::BuiltPrompt;
use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Trait for answer providers.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Generate an answer for an assembled prompt.
    async fn answer(&self, prompt: &BuiltPrompt) -> Result<String, AnswerError>;
}

/// Chat-completions implementation of [`AnswerService`].
pub struct ChatAnswerService {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl ChatAnswerService {
    /// Build a service from settings.
    ///
    /// Resolves the credential immediately, so a missing API key fails here
    /// rather than on the first question.
    pub fn new(settings: &AnswerSettings) -> crate::error::Result<Self> {
        Ok(Self {
            client: crate::openai::create_client(settings)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Assemble the message list: system instruction, prior turns as plain
    /// user/assistant exchanges, then the current user payload.
    fn build_messages(
        &self,
        prompt: &BuiltPrompt,
    ) -> Result<Vec<ChatCompletionRequestMessage>, AnswerError> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system.clone())
                .build()
                .map_err(|e| AnswerError::Model(e.to_string()))?
                .into(),
        );

        for turn in &prompt.history {
            messages.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.question.clone())
                    .build()
                    .map_err(|e| AnswerError::Model(e.to_string()))?
                    .into(),
            );
            messages.push(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.answer.clone())
                    .build()
                    .map_err(|e| AnswerError::Model(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.clone())
                .build()
                .map_err(|e| AnswerError::Model(e.to_string()))?
                .into(),
        );

        Ok(messages)
    }
}

#[async_trait]
impl AnswerService for ChatAnswerService {
    #[instrument(skip(self, prompt))]
    async fn answer(&self, prompt: &BuiltPrompt) -> Result<String, AnswerError> {
        info!(
            "Generating answer ({} prior turns re-sent)",
            prompt.history.len()
        );

        let messages = self.build_messages(prompt)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| AnswerError::Model(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_api_error)?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AnswerError::Model("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated answer ({} chars)", answer.len());

        Ok(answer)
    }
}

/// Sort an API failure into the answer taxonomy.
///
/// The OpenAI-compatible error body carries a free-form type and message, so
/// classification goes by well-known substrings; anything unrecognized is a
/// model-level failure.
fn classify_api_error(err: OpenAIError) -> AnswerError {
    match err {
        OpenAIError::Reqwest(e) => AnswerError::Network(e.to_string()),
        OpenAIError::JSONDeserialize(e) => {
            AnswerError::Model(format!("unparsable API response: {}", e))
        }
        OpenAIError::ApiError(api) => {
            let text = format!(
                "{} {}",
                api.r#type.clone().unwrap_or_default(),
                api.message
            )
            .to_lowercase();

            if text.contains("api key")
                || text.contains("api_key")
                || text.contains("authentication")
                || text.contains("unauthorized")
                || text.contains("permission")
            {
                AnswerError::Auth(api.message)
            } else if text.contains("quota")
                || text.contains("rate limit")
                || text.contains("rate_limit")
                || text.contains("billing")
            {
                AnswerError::Quota(api.message)
            } else {
                AnswerError::Model(api.message)
            }
        }
        other => AnswerError::Model(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;

    fn api_error(r#type: Option<&str>, message: &str) -> OpenAIError {
        OpenAIError::ApiError(ApiError {
            message: message.to_string(),
            r#type: r#type.map(|t| t.to_string()),
            param: None,
            code: None,
        })
    }

    #[test]
    fn test_classify_bad_key_as_auth() {
        let err = api_error(
            Some("invalid_request_error"),
            "Incorrect API key provided: sk-abc...",
        );
        assert!(matches!(classify_api_error(err), AnswerError::Auth(_)));
    }

    #[test]
    fn test_classify_auth_type_as_auth() {
        let err = api_error(Some("authentication_error"), "missing bearer token");
        assert!(matches!(classify_api_error(err), AnswerError::Auth(_)));
    }

    #[test]
    fn test_classify_quota_as_quota() {
        let err = api_error(
            Some("insufficient_quota"),
            "You exceeded your current quota, please check your plan and billing details.",
        );
        assert!(matches!(classify_api_error(err), AnswerError::Quota(_)));
    }

    #[test]
    fn test_classify_rate_limit_as_quota() {
        let err = api_error(None, "Rate limit reached for gpt-4o-mini");
        assert!(matches!(classify_api_error(err), AnswerError::Quota(_)));
    }

    #[test]
    fn test_classify_context_length_as_model() {
        let err = api_error(
            Some("invalid_request_error"),
            "This model's maximum context length is 128000 tokens.",
        );
        assert!(matches!(classify_api_error(err), AnswerError::Model(_)));
    }

    #[test]
    fn test_classify_bad_json_as_model() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = OpenAIError::JSONDeserialize(json_err);
        assert!(matches!(classify_api_error(err), AnswerError::Model(_)));
    }

    #[test]
    fn test_classify_invalid_argument_as_model() {
        let err = OpenAIError::InvalidArgument("messages required".to_string());
        assert!(matches!(classify_api_error(err), AnswerError::Model(_)));
    }
}
