//! LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`       = bearer credential
//! - `OPENAI_BASE_URL`      = API base (default `https://api.openai.com`)
//! - `OPENAI_MODEL`         = model id (default `gpt-4`)
//! - `LLM_TEMPERATURE`      = sampling temperature (default `0.7`, range `0.0..=2.0`)
//! - `LLM_MAX_TOKENS`       = optional completion cap (u32)
//! - `LLM_TIMEOUT_SECS`     = optional request timeout (u64); unset means none
//! - `LLM_MAX_RETRIES`      = retries on transient failures (default `0`)
//! - `LLM_RETRY_BACKOFF_MS` = initial backoff (default `250`)
//! - `LLM_REQUIRE_API_KEY`  = fail at start-up when the key is missing (default `true`)

use std::time::Duration;

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, EnvLookup, env_opt, env_opt_bool, env_opt_f32, env_opt_u32,
        env_opt_u64, env_or, must_env, process_env, validate_http_endpoint, validate_range_f32,
    },
    retry::RetryPolicy,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

impl LlmModelConfig {
    /// Builds the config from the process environment.
    ///
    /// # Errors
    /// See [`LlmModelConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::from_lookup(&process_env)
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// The API key is optional here; whether its absence is fatal is decided
    /// by [`require_api_key`].
    ///
    /// # Errors
    /// - [`ConfigError::InvalidNumber`] for malformed numeric variables
    /// - [`ConfigError::InvalidFormat`] if `OPENAI_BASE_URL` is not http(s)
    /// - [`ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self, AiLlmError> {
        let endpoint = env_or(env, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);
        validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;

        let model = env_or(env, "OPENAI_MODEL", DEFAULT_OPENAI_MODEL);

        let temperature = env_opt_f32(env, "LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
        validate_range_f32(
            "temperature",
            "expected 0.0..=2.0",
            temperature,
            0.0,
            2.0,
        )?;

        let backoff_ms =
            env_opt_u64(env, "LLM_RETRY_BACKOFF_MS")?.unwrap_or(DEFAULT_RETRY_BACKOFF_MS);
        let retry = RetryPolicy {
            max_retries: env_opt_u32(env, "LLM_MAX_RETRIES")?.unwrap_or(0),
            initial_backoff: Duration::from_millis(backoff_ms),
            ..RetryPolicy::none()
        };

        Ok(Self {
            model,
            endpoint,
            api_key: env_opt(env, "OPENAI_API_KEY"),
            max_tokens: env_opt_u32(env, "LLM_MAX_TOKENS")?,
            temperature,
            timeout_secs: env_opt_u64(env, "LLM_TIMEOUT_SECS")?,
            retry,
        })
    }

    /// Checks the fields the generation call cannot work without.
    pub fn validate(&self) -> Result<(), AiLlmError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("OPENAI_BASE_URL", self.endpoint.trim())
    }
}

/// Start-up credential check.
///
/// Reads `LLM_REQUIRE_API_KEY` (default `true`). When enabled, a missing
/// `OPENAI_API_KEY` is reported as [`ConfigError::MissingVar`].
pub fn require_api_key(env: &impl EnvLookup) -> Result<(), AiLlmError> {
    if env_opt_bool(env, "LLM_REQUIRE_API_KEY")?.unwrap_or(true) {
        must_env(env, "OPENAI_API_KEY")?;
    }
    Ok(())
}
