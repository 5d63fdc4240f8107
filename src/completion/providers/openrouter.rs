//! Aggregator client for OpenRouter.
//!
//! One POST to the routing endpoint; the configured model identifier decides
//! which upstream provider serves the request. No system instruction is
//! injected on this path — the prompt travels alone as a single user message.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info, warn};

use crate::completion::provider::{CompletionError, CompletionProvider};
use crate::completion::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::config::{
    DEFAULT_MAX_TOKENS, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
    OPENROUTER_API_KEY_VAR, OPENROUTER_PLACEHOLDER_KEY, aggregator_model_from_env,
    api_key_from_env, validate_api_key,
};

/// Client for the OpenRouter routing endpoint.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenRouterClient {
    /// Creates a new client.
    ///
    /// Fails closed with [`CompletionError::Config`] when `api_key` is empty
    /// or still the `.env` template placeholder. `model`, `base_url`, and
    /// `timeout` default to the configured aggregator model, the production
    /// endpoint, and 120 seconds.
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        validate_api_key(&api_key, OPENROUTER_PLACEHOLDER_KEY, OPENROUTER_API_KEY_VAR)?;

        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Config(format!("failed to build HTTP client: {e}")))?;

        let model = model.unwrap_or_else(aggregator_model_from_env);
        info!("OpenRouter client initialized successfully");
        info!("Using model: {model}");

        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            model,
            timeout,
        })
    }

    /// Creates a client from the `OPENROUTER_API_KEY` environment variable,
    /// with the model taken from `OPENROUTER_MODEL` when set.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = api_key_from_env(OPENROUTER_API_KEY_VAR, OPENROUTER_PLACEHOLDER_KEY)?;
        Self::new(api_key, None, None, None)
    }

    /// The model identifier requests are routed to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// One completion round trip with the default generation parameters
    /// (temperature 0.7, 4000 max tokens), failure class preserved.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.try_complete_with(prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
            .await
    }

    pub async fn try_complete_with(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        info!("Sending request to {} via OpenRouter", self.model);
        info!("Prompt length: {} characters", prompt.len());

        let request = self.build_request(prompt, temperature, max_tokens);

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
            warn!("OpenRouter API returned status code: {status}");
            warn!("Response: {body}");
            return Err(CompletionError::Api { status, body });
        }

        // Decode from text so the raw body is available for the
        // missing-choices log below.
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;
        let body: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("JSON parsing error: {e}");
            CompletionError::Parse(e.to_string())
        })?;

        match body.choices.into_iter().next() {
            Some(choice) => {
                let content = choice.message.content;
                info!("{} response received successfully", self.model);
                info!("Response length: {} characters", content.len());
                Ok(content)
            }
            None => {
                warn!("No choices found in OpenRouter response");
                warn!("Response structure: {text}");
                Err(CompletionError::NoChoices)
            }
        }
    }

    /// Flattening wrapper with caller-chosen generation parameters:
    /// `Some(content)` on success, `None` on any failure, cause in the log
    /// only.
    pub async fn complete_with(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Option<String> {
        match self.try_complete_with(prompt, temperature, max_tokens).await {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Error calling OpenRouter API: {e}");
                None
            }
        }
    }

    fn build_request(&self, prompt: &str, temperature: f32, max_tokens: u32) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature,
            max_tokens,
        }
    }

    fn classify_send_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            warn!(
                "Request timeout - OpenRouter API took longer than {}s to respond",
                self.timeout.as_secs()
            );
            CompletionError::Timeout(self.timeout)
        } else {
            warn!("HTTP request error: {e}");
            CompletionError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, prompt: &str) -> Option<String> {
        match self.try_complete(prompt).await {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Error calling OpenRouter API: {e}");
                None
            }
        }
    }
}
