//! OpenAI (ChatGPT) service for text generation.
//!
//! Minimal, non-streaming client around the chat completions endpoint:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.model` must not be empty
//! - `cfg.endpoint` must start with http:// or https://
//!
//! A missing `cfg.api_key` is not rejected here; every call then fails with
//! `MissingApiKey` before touching the network.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, ProviderErrorKind, make_snippet},
    generator::TextGenerator,
};

/// Thin client for the OpenAI API.
///
/// Constructed once from a complete [`LlmModelConfig`] and shared. Holds a
/// preconfigured `reqwest::Client` and no per-request state.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] if the model is empty or the endpoint is not http(s)
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        cfg.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = ?cfg.timeout_secs,
            max_retries = cfg.retry.max_retries,
            has_api_key = cfg.api_key.is_some(),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion with a single user message.
    ///
    /// Transient failures are retried according to `cfg.retry`.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::MissingApiKey`] if no key is configured
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] / [`AiLlmError::Timeout`] for network failures
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed
    /// - [`ProviderErrorKind::EmptyChoices`] if no choice carries text
    pub async fn chat_completion(&self, prompt: &str) -> Result<String, AiLlmError> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or(ProviderErrorKind::MissingApiKey)?;

        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);
        let body = &body;
        self.cfg
            .retry
            .run("chat_completion", move || self.send_once(api_key, body))
            .await
    }

    async fn send_once(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, AiLlmError> {
        let started = Instant::now();

        debug!(
            model = %self.cfg.model,
            prompt_len = body.messages.first().map(|m| m.content.len()).unwrap_or(0),
            "POST {}", self.url_chat
        );

        let resp = self
            .client
            .post(&self.url_chat)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let snippet = make_snippet(&text);
            error!(
                %status,
                url = %self.url_chat,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "OpenAI /v1/chat/completions returned non-success status"
            );
            return Err(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url: self.url_chat.clone(),
                snippet,
            })
            .into());
        }

        let out: ChatCompletionResponse = serde_json::from_str(&text).map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode /v1/chat/completions response"
            );
            ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            ))
        })?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(ProviderErrorKind::EmptyChoices)?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            answer_len = content.len(),
            "chat completion completed"
        );

        Ok(content)
    }

    fn transport_error(&self, err: reqwest::Error) -> AiLlmError {
        match self.cfg.timeout_secs {
            Some(secs) if err.is_timeout() => AiLlmError::Timeout(Duration::from_secs(secs)),
            _ => AiLlmError::HttpTransport(err),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiService {
    async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.chat_completion(prompt).await
    }

    fn model(&self) -> &str {
        &self.cfg.model
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}
