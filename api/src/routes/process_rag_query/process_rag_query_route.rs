//! POST /process_rag_query: answers a question from retrieved context.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::{AskOptions, QaAnswer, ask};
use tracing::{error, info, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::into_response_with_status},
    error_handler::{AppError, AppResult, ErrorKind},
    routes::process_rag_query::{
        process_rag_query_request::ProcessRagQueryRequest,
        process_rag_query_response::ProcessRagQueryResponse,
    },
};

/// Handler: POST /process_rag_query
///
/// Every outcome is a JSON body: the answer envelope with 200, or
/// `{"error": ...}` with 400 (missing question) or 500 (anything else).
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8080/process_rag_query \
///   -H 'content-type: application/json' \
///   -d '{"question":"When is payment due?","top_k":2}'
/// ```
pub async fn process_rag_query(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = match body {
        Ok(bytes) => {
            info!(body_len = bytes.len(), "processing RAG query");
            handle(&state, &bytes).await
        }
        // Oversized or interrupted bodies still get the JSON envelope.
        Err(rejection) => Err(AppError::from(rejection)),
    };

    match result {
        Ok(resp) => into_response_with_status(StatusCode::OK, resp),
        Err(err) => {
            match err.kind() {
                ErrorKind::Validation => warn!(error = %err, "rejected RAG query"),
                ErrorKind::Upstream => error!(error = %err, detail = ?err, "RAG processing failed"),
            }
            err.into_response()
        }
    }
}

async fn handle(state: &AppState, body: &[u8]) -> AppResult<ProcessRagQueryResponse> {
    let req = ProcessRagQueryRequest::from_body(body)?;
    if req.question.is_empty() {
        return Err(AppError::MissingQuestion);
    }

    info!(
        question_len = req.question.len(),
        top_k = req.top_k,
        "running context retrieval and synthesis"
    );

    let QaAnswer { answer, context } = ask(
        &req.question,
        AskOptions { top_k: req.top_k },
        state.provider.as_ref(),
        state.generator.as_ref(),
    )
    .await?;

    Ok(ProcessRagQueryResponse {
        question: req.question,
        context_used: context,
        answer,
    })
}
