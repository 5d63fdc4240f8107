use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Errors that can occur while talking to a completion API.
/// Only `Config` ever reaches a caller as a hard error (at construction);
/// per-call failures are flattened to `None` by the `complete*` wrappers.
#[derive(Debug)]
pub enum CompletionError {
    /// Client misconfigured (missing or placeholder API key). Fatal, raised
    /// at construction before any network call.
    Config(String),
    /// Network-level failure (DNS, connection refused, broken transfer).
    Network(String),
    /// The round trip exceeded the configured timeout.
    Timeout(Duration),
    /// API returned a non-success status.
    Api { status: u16, body: String },
    /// Response body was not valid JSON for the expected shape.
    Parse(String),
    /// Response decoded cleanly but carried no choices to extract.
    NoChoices,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Config(msg) => write!(f, "config error: {msg}"),
            CompletionError::Network(msg) => write!(f, "network error: {msg}"),
            CompletionError::Timeout(bound) => {
                write!(f, "request timed out after {}s", bound.as_secs())
            }
            CompletionError::Api { status, body } => {
                write!(f, "API error (HTTP {status}): {body}")
            }
            CompletionError::Parse(msg) => write!(f, "parse error: {msg}"),
            CompletionError::NoChoices => write!(f, "no choices in response"),
        }
    }
}

impl std::error::Error for CompletionError {}

/// Common seam over the two clients so an application can pick one via
/// configuration and hold an `Arc<dyn CompletionProvider>`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Runs one completion round trip with the client's defaults.
    ///
    /// Any failure is logged and collapsed to `None` — callers must treat
    /// absence as "unknown reason, inspect logs".
    async fn complete(&self, prompt: &str) -> Option<String>;
}
