//! Direct OpenAI chat-completions client.
//!
//! Every prompt travels as a fixed two-message exchange: a system
//! instruction that sets an architect persona, then the user's prompt.
//! Output is capped at 4000 tokens with temperature 0.7.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};

use crate::completion::provider::{CompletionError, CompletionProvider};
use crate::completion::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::{
    DEFAULT_MAX_TOKENS, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS, OPENAI_API_KEY_VAR, OPENAI_PLACEHOLDER_KEY, api_key_from_env,
    validate_api_key,
};

/// System instruction sent ahead of every prompt on this path.
const SYSTEM_INSTRUCTION: &str = "You are an expert software developer and architect. \
    Provide comprehensive, detailed, and well-structured responses in Markdown format.";

/// Client for OpenAI's native chat-completions endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// Fails closed with [`CompletionError::Config`] when `api_key` is empty
    /// or still the `.env` template placeholder. `base_url` and `timeout`
    /// default to the production endpoint and 120 seconds.
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        validate_api_key(&api_key, OPENAI_PLACEHOLDER_KEY, OPENAI_API_KEY_VAR)?;

        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Config(format!("failed to build HTTP client: {e}")))?;

        info!("OpenAI client initialized successfully");
        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            timeout,
        })
    }

    /// Creates a client from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = api_key_from_env(OPENAI_API_KEY_VAR, OPENAI_PLACEHOLDER_KEY)?;
        Self::new(api_key, None, None)
    }

    /// One completion round trip against the default model, with the failure
    /// class preserved. `complete` is the flattened public form.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.try_complete_with_model(prompt, DEFAULT_OPENAI_MODEL)
            .await
    }

    pub async fn try_complete_with_model(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<String, CompletionError> {
        info!("Sending request to {model}");
        info!("Prompt length: {} characters", prompt.len());

        let request = build_request(prompt, model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenAI API error: {status} - {body}");
            return Err(CompletionError::Api { status, body });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse OpenAI response: {e}");
            CompletionError::Parse(e.to_string())
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                warn!("No choices found in OpenAI response");
                CompletionError::NoChoices
            })?;

        info!("{model} response received successfully");
        info!("Response length: {} characters", content.len());
        Ok(content)
    }

    /// Flattening wrapper for a caller-chosen model: `Some(content)` on
    /// success, `None` on any failure, cause in the log only.
    pub async fn complete_with_model(&self, prompt: &str, model: &str) -> Option<String> {
        match self.try_complete_with_model(prompt, model).await {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Error calling OpenAI API: {e}");
                None
            }
        }
    }

    fn classify_send_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            warn!(
                "Request timeout - OpenAI API took longer than {}s to respond",
                self.timeout.as_secs()
            );
            CompletionError::Timeout(self.timeout)
        } else {
            warn!("HTTP request error: {e}");
            CompletionError::Network(e.to_string())
        }
    }
}

/// Builds the fixed system + user exchange with this path's generation
/// parameters.
fn build_request(prompt: &str, model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(prompt),
        ],
        temperature: DEFAULT_TEMPERATURE,
        max_tokens: DEFAULT_MAX_TOKENS,
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Option<String> {
        match self.try_complete(prompt).await {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Error calling OpenAI API: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::types::Role;

    #[test]
    fn test_build_request_sends_system_then_user() {
        let request = build_request("Design a cache", "gpt-4o");

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("expert software"));
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Design a cache");
    }

    #[test]
    fn test_build_request_uses_fixed_generation_parameters() {
        let request = build_request("hi", "gpt-4o");
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 4000);
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let result = OpenAiClient::new(String::new(), None, None);
        assert!(matches!(result, Err(CompletionError::Config(_))));
    }

    #[test]
    fn test_new_rejects_placeholder_key() {
        let result = OpenAiClient::new(OPENAI_PLACEHOLDER_KEY.to_string(), None, None);
        assert!(matches!(result, Err(CompletionError::Config(_))));
    }

    #[test]
    fn test_new_defaults_to_production_endpoint() {
        let client = OpenAiClient::new("sk-test".to_string(), None, None).unwrap();
        assert_eq!(client.base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
