//! Environment-sourced settings and the model short-name registry.
//!
//! Every tunable lives here: env var names, placeholder values the `.env`
//! template ships with, endpoint defaults, and generation parameters. The
//! crate reads process environment variables directly; loading a `.env`
//! file into the environment is the owning application's job.

use crate::completion::provider::CompletionError;

// ============================================================================
// Environment variables
// ============================================================================

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";
/// Overrides the aggregator's model identifier for easy switching.
pub const OPENROUTER_MODEL_VAR: &str = "OPENROUTER_MODEL";

/// Placeholder values from the `.env` template. A key left at one of these
/// is treated the same as a missing key: construction fails closed.
pub const OPENAI_PLACEHOLDER_KEY: &str = "your_openai_api_key_here";
pub const OPENROUTER_PLACEHOLDER_KEY: &str = "your_openrouter_api_key_here";

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENROUTER_MODEL: &str = "qwen/qwen3-coder:free";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
/// One explicit bound for both clients. Generous because free-tier
/// aggregator models can take a long time on large responses.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// Model registry
// ============================================================================

/// Short names mapped to full OpenRouter model identifiers. Not consumed by
/// the call path itself; applications use it to switch models by hand.
pub const MODEL_REGISTRY: &[(&str, &str)] = &[
    ("qwen", "qwen/qwen3-coder:free"),
    ("gemini", "google/gemini-2.5-pro-exp-03-25"),
    ("claude", "anthropic/claude-3.5-sonnet"),
    ("gpt", "openai/gpt-4o"),
    ("llama", "meta-llama/llama-3.1-70b-instruct:free"),
];

/// Looks up a short name in the registry, falling back to the default
/// aggregator model for unknown keys.
pub fn model_for(key: &str) -> &'static str {
    MODEL_REGISTRY
        .iter()
        .find(|(short, _)| *short == key)
        .map(|(_, id)| *id)
        .unwrap_or(DEFAULT_OPENROUTER_MODEL)
}

/// Resolves the aggregator model identifier: env override, then default.
pub fn aggregator_model_from_env() -> String {
    std::env::var(OPENROUTER_MODEL_VAR).unwrap_or_else(|_| DEFAULT_OPENROUTER_MODEL.to_string())
}

// ============================================================================
// Credentials
// ============================================================================

/// Rejects empty and placeholder credentials. `var` names the variable in
/// the error message so the fix is obvious from the failure alone.
pub fn validate_api_key(key: &str, placeholder: &str, var: &str) -> Result<(), CompletionError> {
    if key.trim().is_empty() || key == placeholder {
        return Err(CompletionError::Config(format!(
            "{var} is not set to a real API key; set it in the environment or .env file"
        )));
    }
    Ok(())
}

/// Reads a credential from the environment, failing closed on missing or
/// placeholder values.
pub fn api_key_from_env(var: &str, placeholder: &str) -> Result<String, CompletionError> {
    let key = std::env::var(var).unwrap_or_default();
    validate_api_key(&key, placeholder, var)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_for_known_short_names() {
        assert_eq!(model_for("qwen"), "qwen/qwen3-coder:free");
        assert_eq!(model_for("claude"), "anthropic/claude-3.5-sonnet");
        assert_eq!(model_for("gpt"), "openai/gpt-4o");
        assert_eq!(model_for("llama"), "meta-llama/llama-3.1-70b-instruct:free");
        assert_eq!(model_for("gemini"), "google/gemini-2.5-pro-exp-03-25");
    }

    #[test]
    fn test_model_for_unknown_key_falls_back_to_default() {
        assert_eq!(model_for("does-not-exist"), DEFAULT_OPENROUTER_MODEL);
        assert_eq!(model_for(""), DEFAULT_OPENROUTER_MODEL);
    }

    #[test]
    fn test_validate_api_key_accepts_real_key() {
        assert!(validate_api_key("sk-or-abc123", OPENROUTER_PLACEHOLDER_KEY, "X").is_ok());
    }

    #[test]
    fn test_validate_api_key_rejects_empty_and_whitespace() {
        assert!(validate_api_key("", OPENAI_PLACEHOLDER_KEY, "X").is_err());
        assert!(validate_api_key("   ", OPENAI_PLACEHOLDER_KEY, "X").is_err());
    }

    #[test]
    fn test_validate_api_key_rejects_placeholder() {
        let err = validate_api_key(
            OPENAI_PLACEHOLDER_KEY,
            OPENAI_PLACEHOLDER_KEY,
            OPENAI_API_KEY_VAR,
        )
        .unwrap_err();
        assert!(matches!(err, CompletionError::Config(_)));
        assert!(err.to_string().contains(OPENAI_API_KEY_VAR));
    }
}
