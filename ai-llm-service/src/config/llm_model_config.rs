use crate::retry::RetryPolicy;

/// Configuration for the text-generation call made by the answer synthesizer.
///
/// # Fields
///
/// - `model`: model identifier (e.g., `"gpt-4"`).
/// - `endpoint`: API base URL; `/v1/chat/completions` is appended.
/// - `api_key`: bearer credential. `None` is allowed at construction time and
///   surfaces as `MissingApiKey` on the first call.
/// - `max_tokens`: optional completion cap.
/// - `temperature`: fixed creativity setting sent with every request.
/// - `timeout_secs`: per-request timeout; `None` means no client-side timeout.
/// - `retry`: policy for transient failures; zero retries by default.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, RetryPolicy};
///
/// let cfg = LlmModelConfig {
///     model: "gpt-4".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: None,
///     temperature: 0.7,
///     timeout_secs: Some(30),
///     retry: RetryPolicy::none(),
/// };
/// assert_eq!(cfg.model, "gpt-4");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Remote API base URL.
    pub endpoint: String,

    /// API key for bearer authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: f32,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}
