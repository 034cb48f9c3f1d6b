//! Shared text-generation client used by the RAG query service.
//!
//! - [`config`]: model config loaded from environment variables.
//! - [`services::open_ai_service::OpenAiService`]: non-streaming chat completions.
//! - [`generator::TextGenerator`]: the seam the answer synthesizer depends on.
//! - [`telemetry`]: formatting layer for `tracing-subscriber`.

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
}

pub mod services {
    pub mod open_ai_service;
}

pub mod error_handler;
pub mod generator;
pub mod retry;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError, HttpError, ProviderErrorKind};
pub use generator::TextGenerator;
pub use retry::RetryPolicy;
pub use services::open_ai_service::OpenAiService;
