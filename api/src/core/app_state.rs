use std::sync::Arc;

use ai_llm_service::{
    LlmModelConfig, OpenAiService, TextGenerator,
    config::default_config::require_api_key,
    error_handler::{env_or, process_env},
};
use contextor::{ContextProvider, StaticContextProvider};

use crate::error_handler::AppError;

/// Listen address used when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8080";

/// Shared state for all HTTP handlers.
///
/// Both collaborators are built once at start-up and shared by every request;
/// neither carries per-request state.
#[derive(Clone)]
pub struct AppState {
    /// Source of context passages.
    pub provider: Arc<dyn ContextProvider>,
    /// Text-generation client used by the answer synthesizer.
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(provider: Arc<dyn ContextProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            provider,
            generator,
        }
    }

    /// Production wiring: static clause pool + OpenAI client from environment.
    ///
    /// # Errors
    /// - [`AppError::Llm`] when the LLM config is invalid, or when the API key
    ///   is missing and `LLM_REQUIRE_API_KEY` is not disabled
    pub fn from_env() -> Result<Self, AppError> {
        require_api_key(&process_env)?;
        let llm_cfg = LlmModelConfig::from_env()?;
        let generator = OpenAiService::new(llm_cfg)?;

        Ok(Self::new(
            Arc::new(StaticContextProvider::default()),
            Arc::new(generator),
        ))
    }
}

/// Server settings.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// `host:port` to bind.
    pub address: String,
}

impl ApiConfig {
    /// Load from `API_ADDRESS`, defaulting to [`DEFAULT_API_ADDRESS`].
    pub fn from_env() -> Self {
        Self {
            address: env_or(&process_env, "API_ADDRESS", DEFAULT_API_ADDRESS),
        }
    }
}
