//! HTTP API Adapter
//!
//! axum router exposing the analyzer:
//! - `POST /analyze` - score a token address
//! - `GET /` - banner
//! - `GET /health` - liveness
//! - `GET /test-config` - credential presence report

mod error;
mod handlers;

pub use error::{ApiError, INTERNAL_ERROR, INVALID_ADDRESS, INVALID_BODY};
pub use handlers::AnalyzeResponse;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::AnalysisOrchestrator;
use crate::config::ConfigStatus;

/// Application state shared across handlers
pub struct AppState {
    pub analyzer: Arc<AnalysisOrchestrator>,
    pub config_status: ConfigStatus,
}

/// Build the router with permissive CORS and request tracing
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/test-config", get(handlers::test_config))
        .route("/analyze", post(handlers::analyze))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("SniffTools API listening on {}", addr);
    axum::serve(listener, app).await
}
