//! Typed error for the contextor crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The context provider could not produce passages.
    #[error("context retrieval failed: {0}")]
    Retrieval(String),

    /// The text-generation call failed (network, auth, quota, malformed reply).
    #[error(transparent)]
    Llm(#[from] AiLlmError),
}
