use ai_llm_service::AiLlmError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use thiserror::Error;

use crate::core::http::response_envelope::{ErrorEnvelope, into_response_with_status};

/// Exact message returned when the question is missing or empty.
pub const MISSING_QUESTION: &str = "Missing 'question' in request body.";

/// Failure class visible to callers and tests without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is unusable (400).
    Validation,
    /// Anything that went wrong while processing a well-formed request,
    /// including body decoding and the outbound generation call (500).
    Upstream,
}

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Request ---
    #[error("Missing 'question' in request body.")]
    MissingQuestion,

    /// Body is not a JSON object, or a field cannot be coerced.
    #[error("{0}")]
    InvalidBody(String),

    // --- Pipeline ---
    #[error(transparent)]
    Pipeline(#[from] ContextorError),

    // --- Boot / server ---
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingQuestion => ErrorKind::Validation,
            AppError::InvalidBody(_)
            | AppError::Pipeline(_)
            | AppError::Llm(_)
            | AppError::Bind { .. }
            | AppError::Server(_) => ErrorKind::Upstream,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::InvalidBody(format!("unreadable request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        into_response_with_status(self.status_code(), ErrorEnvelope::new(self.to_string()))
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
