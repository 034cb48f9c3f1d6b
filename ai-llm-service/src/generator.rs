//! Text-generation seam.
//!
//! The answer synthesizer only needs "prompt in, text out". Production code
//! passes an [`OpenAiService`](crate::services::open_ai_service::OpenAiService);
//! tests pass a stub.

use async_trait::async_trait;

use crate::error_handler::AiLlmError;

/// Produces one completion for a single-turn prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` as a single user message and returns the raw completion text.
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}
