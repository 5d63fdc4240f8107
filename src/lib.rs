//! Courier — forwards a text prompt to a hosted LLM API and hands back the
//! generated text, or nothing at all.
//!
//! Two independent clients are provided:
//!
//! - [`OpenAiClient`]: calls OpenAI's chat-completions endpoint directly,
//!   wrapping every prompt in a fixed system instruction.
//! - [`OpenRouterClient`]: calls the OpenRouter aggregator, which routes the
//!   request to whichever upstream model the configured identifier names.
//!
//! Both share the same failure philosophy: no error ever crosses the
//! `complete` boundary. Every failure mode collapses to `None` for the
//! caller, with the cause written to the log. The `try_complete*` methods
//! expose the tagged [`CompletionError`] for callers that need to tell
//! failure classes apart.
//!
//! The crate never loads `.env` files or installs a logger; the owning
//! application does both before constructing a client.

pub mod completion;
pub mod config;

pub use completion::{CompletionError, CompletionProvider, OpenAiClient, OpenRouterClient};
