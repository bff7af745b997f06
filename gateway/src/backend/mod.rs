//! RAG backend access.
//!
//! [`BackendTransport`] is the raw HTTP seam; [`ResilientClient`] layers the
//! per-profile retry policy and deadline on top of it.

mod client;
mod http;

pub use client::ResilientClient;
pub use http::HttpTransport;

use async_trait::async_trait;
use hukum_common::{ChatRequest, ChatResponse};
use serde::Deserialize;
use serde_json::Value;

/// Structured failure of a single backend call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportFailure {
    /// Nothing is listening yet, typically while the backend loads models.
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connected, but the backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

/// A backend `/chat` answer.
///
/// `body` is the JSON exactly as the backend sent it and is what the extended
/// entry point returns. `response` is the typed view used for logging and
/// citations.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub body: Value,
    pub response: ChatResponse,
}

impl BackendReply {
    /// Accept `body` only if it reads as a [`ChatResponse`].
    pub fn from_body(body: Value) -> Result<Self, TransportFailure> {
        let response = ChatResponse::deserialize(&body)
            .map_err(|e| TransportFailure::Decode(e.to_string()))?;
        Ok(Self { body, response })
    }
}

/// One-shot calls to the backend, without any retry.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// `POST {base_url}/chat`.
    async fn post_chat(&self, request: &ChatRequest) -> Result<BackendReply, TransportFailure>;

    /// `GET {base_url}/health`.
    async fn health(&self) -> Result<Value, TransportFailure>;
}
