//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`ProviderErrorKind`]). Small helpers for reading/validating environment
//! variables are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the prefix `[AI LLM Service]` to simplify attribution in logs.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The text-generation provider rejected the call or answered with garbage.
    #[error("[AI LLM Service] OpenAI: {0}")]
    Provider(#[from] ProviderErrorKind),

    /// Underlying HTTP transport error (connect, TLS, body read).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Operation exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl AiLlmError {
    /// Returns `true` for failures worth another attempt: transport hiccups,
    /// timeouts, rate limiting (429) and upstream 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            AiLlmError::Timeout(_) => true,
            AiLlmError::HttpTransport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            AiLlmError::Provider(ProviderErrorKind::HttpStatus(http)) => {
                http.status == StatusCode::TOO_MANY_REQUESTS || http.status.is_server_error()
            }
            _ => false,
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Non-2xx response captured for diagnostics.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body.
    pub snippet: String,
}

/// What went wrong while talking to the generation provider.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// No API key was configured.
    #[error("missing API key (set OPENAI_API_KEY)")]
    MissingApiKey,

    /// Endpoint is empty or does not use http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// Response decoded fine but carried no textual completion.
    #[error("response contained no completion text")]
    EmptyChoices,
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (limits, timeouts, retries).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// A flag was not one of the accepted boolean spellings.
    #[error("[AI LLM Service] invalid boolean in {0}: expected true/false")]
    InvalidBool(&'static str),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OPENAI_BASE_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `temperature`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Source of configuration values. `std::env::var` in production,
/// a map in tests.
pub trait EnvLookup {
    fn get(&self, name: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Looks up a variable and drops blank values.
fn non_empty(env: &impl EnvLookup, name: &str) -> Option<String> {
    env.get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fetches a required, non-empty variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(env: &impl EnvLookup, name: &'static str) -> Result<String> {
    non_empty(env, name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

/// Fetches an optional variable, falling back to `default` when unset/empty.
pub fn env_or(env: &impl EnvLookup, name: &str, default: &str) -> String {
    non_empty(env, name).unwrap_or_else(|| default.to_string())
}

/// Fetches an optional, non-empty variable.
pub fn env_opt(env: &impl EnvLookup, name: &str) -> Option<String> {
    non_empty(env, name)
}

/// Parses an optional `u32` (`Ok(None)` if unset/empty).
pub fn env_opt_u32(env: &impl EnvLookup, name: &'static str) -> Result<Option<u32>> {
    parse_opt(env, name, "expected u32")
}

/// Parses an optional `u64` (`Ok(None)` if unset/empty).
pub fn env_opt_u64(env: &impl EnvLookup, name: &'static str) -> Result<Option<u64>> {
    parse_opt(env, name, "expected u64")
}

/// Parses an optional `f32` (`Ok(None)` if unset/empty).
pub fn env_opt_f32(env: &impl EnvLookup, name: &'static str) -> Result<Option<f32>> {
    parse_opt(env, name, "expected a decimal number")
}

/// Parses an optional boolean flag (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn env_opt_bool(env: &impl EnvLookup, name: &'static str) -> Result<Option<bool>> {
    match non_empty(env, name) {
        None => Ok(None),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidBool(name).into()),
        },
    }
}

fn parse_opt<T: std::str::FromStr>(
    env: &impl EnvLookup,
    name: &'static str,
    reason: &'static str,
) -> Result<Option<T>> {
    match non_empty(env, name) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var: name, reason }.into()),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
pub fn validate_range_f32(
    field: &'static str,
    detail: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail }.into())
    }
}

/// Trims a response body to a log-friendly snippet (240 chars max).
pub fn make_snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut out: String = trimmed.chars().take(240).collect();
    if trimmed.chars().count() > 240 {
        out.push('…');
    }
    out
}
