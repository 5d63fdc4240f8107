pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CompletionError, CompletionProvider};
pub use providers::{OpenAiClient, OpenRouterClient};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Choice, Role, Usage};
