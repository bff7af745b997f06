//! Hukum Chat gateway.
//!
//! Sits between the chat UI and the RAG backend: normalizes inbound requests,
//! retries through backend cold starts and replays answers as a frame stream.

pub mod backend;
pub mod citation;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod profile;
pub mod routes;
pub mod stream;
pub mod test_util;

pub use backend::{BackendReply, BackendTransport, HttpTransport, ResilientClient, TransportFailure};
pub use config::Config;
pub use error::Error;
pub use profile::{RequestProfile, RetryPolicy};
pub use stream::StreamPacing;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub client: ResilientClient,
    /// Per-frame pacing for the interactive stream. The route bounds it by
    /// whatever is left of the request deadline.
    pub pacing: StreamPacing,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn BackendTransport>) -> Self {
        let pacing = StreamPacing::new(Duration::from_millis(config.stream.frame_delay_ms));

        Self {
            config,
            client: ResilientClient::new(transport),
            pacing,
        }
    }

    /// State backed by the real HTTP transport.
    pub fn from_config(config: Config) -> Result<Self, TransportFailure> {
        let transport = HttpTransport::new(
            config.backend_url(),
            Duration::from_secs(config.backend.connect_timeout_secs),
        )?;
        Ok(Self::new(config, Arc::new(transport)))
    }
}

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(middleware::from_fn(logging::request_logger))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
