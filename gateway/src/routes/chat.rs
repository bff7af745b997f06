//! Chat entry points.
//!
//! - `POST /api/rag` (extended): waits out backend cold starts and returns the
//!   backend's JSON answer as-is.
//! - `POST /api/chat` (interactive): one attempt, then replays the answer and
//!   its citations as a paced frame stream. Backend call and stream share the
//!   profile deadline.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use futures_util::StreamExt;
use serde_json::Value;
use tokio::time::Instant;
use tracing::Instrument;

use crate::citation::format_citations;
use crate::error::{Error, Result};
use crate::normalize::{ExtendedRequest, InteractiveRequest};
use crate::stream;
use crate::AppState;

const DATA_STREAM_HEADER: &str = "x-vercel-ai-data-stream";

/// Build the chat router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rag", post(extended_chat))
        .route("/api/chat", post(interactive_chat))
}

/// POST /api/rag - full answer as JSON.
async fn extended_chat(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ExtendedRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) = body.map_err(|e| Error::Validation(e.body_text()))?;
    let span = tracing::info_span!("chat", profile = "extended");

    async move {
        let profile = &state.config.profiles.extended;
        let request = body.normalize(profile)?;

        tracing::info!(
            question_chars = request.question.chars().count(),
            "Forwarding question to backend"
        );
        let reply = state.client.send(&request, profile).await?;
        tracing::info!(sources = reply.response.sources.len(), "Backend answered");

        Ok::<_, Error>(Json(reply.body))
    }
    .instrument(span)
    .await
}

/// POST /api/chat - answer plus citations as a frame stream.
async fn interactive_chat(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<InteractiveRequest>, JsonRejection>,
) -> Result<Response> {
    let started = Instant::now();
    let Json(body) = body.map_err(|e| Error::Validation(e.body_text()))?;
    let span = tracing::info_span!("chat", profile = "interactive");

    async move {
        let profile = &state.config.profiles.interactive;
        let request = body.normalize(profile)?;

        tracing::info!(
            question_chars = request.question.chars().count(),
            "Forwarding question to backend"
        );
        let response = state
            .client
            .send(&request, profile)
            .await
            .map_err(Error::into_internal)?
            .response;

        let budget = profile.deadline().saturating_sub(started.elapsed());
        tracing::info!(
            sources = response.sources.len(),
            budget_ms = budget.as_millis() as u64,
            "Backend answered, streaming"
        );

        let text = format_citations(&response.answer, &response.sources);
        let pacing = state.pacing.with_max_duration(budget);
        let frames = stream::adapt(text, pacing)
            .map(|frame| Ok::<_, Infallible>(frame.encode()));

        Ok::<_, Error>((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/event-stream"),
                (header::CACHE_CONTROL, "no-cache"),
                (HeaderName::from_static(DATA_STREAM_HEADER), "v1"),
            ],
            Body::from_stream(frames),
        )
            .into_response())
    }
    .instrument(span)
    .await
}

impl Error {
    /// The interactive entry point reports every backend failure as a 500.
    fn into_internal(self) -> Self {
        match self {
            Error::Validation(_) | Error::Transport(_) => self,
            other => Error::Transport(other.to_string()),
        }
    }
}
