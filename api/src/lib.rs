use std::sync::Arc;

pub mod core {
    pub mod app_state;
    pub mod http {
        pub mod response_envelope;
    }
}
pub mod error_handler;

mod routes {
    pub mod process_rag_query {
        pub mod process_rag_query_request;
        pub mod process_rag_query_response;
        pub mod process_rag_query_route;
    }
}

use axum::{Router, routing::post};
use tokio::signal;
use tracing::info;

pub use crate::core::app_state::{ApiConfig, AppState};
pub use crate::error_handler::{AppError, AppResult, ErrorKind, MISSING_QUESTION};
pub use crate::routes::process_rag_query::process_rag_query_request::{
    ProcessRagQueryRequest, coerce_top_k,
};

use crate::routes::process_rag_query::process_rag_query_route::process_rag_query;

/// Builds the router. The same handler is mounted at the bare path and under
/// `/api`, the prefix serverless hosts usually put in front of functions.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/process_rag_query", post(process_rag_query))
        .route("/api/process_rag_query", post(process_rag_query))
        .with_state(Arc::new(state))
}

/// Loads config from the environment, binds and serves until Ctrl+C.
///
/// # Errors
/// Start-up configuration errors, bind failures, and fatal server errors.
pub async fn start() -> AppResult<()> {
    let cfg = ApiConfig::from_env();
    let state = AppState::from_env()?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .map_err(|source| AppError::Bind {
            addr: cfg.address.clone(),
            source,
        })?;

    info!(address = %cfg.address, "RAG query API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
