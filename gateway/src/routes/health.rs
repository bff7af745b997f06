//! Health check endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::backend::TransportFailure;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/health/backend", get(backend_health))
}

/// GET /health - gateway liveness.
async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// GET /health/backend - single probe of the backend, no retry.
///
/// A refused connection means the backend is still loading its models.
async fn backend_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.client.transport().health().await {
        Ok(backend) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "backend": backend })),
        ),
        Err(TransportFailure::ConnectionRefused(_)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "loading" })),
        ),
        Err(e) => {
            tracing::warn!("Backend health probe failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "status": "unavailable", "details": e.to_string() })),
            )
        }
    }
}
