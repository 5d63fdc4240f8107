pub mod openai;
pub mod openrouter;

pub use openai::OpenAiClient;
pub use openrouter::OpenRouterClient;
