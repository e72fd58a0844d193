//! Text-completion backends.
//!
//! The form server only knows about [`CompletionClient`]; the Gemini
//! implementation is built once at startup and shared by every request.

pub mod config;
mod gemini;
mod types;

use async_trait::async_trait;

use crate::entity::{Completion, Prompt};
use crate::error::Result;

pub use config::CompletionConfig;
pub use gemini::GeminiClient;

/// A service that turns a prompt into a single completion.
///
/// One call per prompt. Implementations must not retry; any failure is
/// returned to the caller as-is.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<Completion>;
}
