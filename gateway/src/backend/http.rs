//! reqwest implementation of the backend transport.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use hukum_common::ChatRequest;
use reqwest::Client;

use super::{BackendReply, BackendTransport, TransportFailure};

/// Plain HTTP transport to the RAG backend.
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, TransportFailure> {
        let http_client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportFailure::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn post_chat(&self, request: &ChatRequest) -> Result<BackendReply, TransportFailure> {
        let url = format!("{}/chat", self.base_url);

        tracing::debug!("Sending chat request to backend: {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportFailure::Status { status, body });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TransportFailure::Decode(e.to_string()))?;

        BackendReply::from_body(body)
    }

    async fn health(&self) -> Result<serde_json::Value, TransportFailure> {
        let url = format!("{}/health", self.base_url);

        let response = self.http_client.get(&url).send().await.map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportFailure::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| TransportFailure::Decode(e.to_string()))
    }
}

/// Map a reqwest send error onto a [`TransportFailure`].
///
/// The refused tag comes from the io error kind in the source chain. reqwest
/// does not expose that kind directly, so the rendered chain is checked as a
/// fallback for wrappers that drop the io error.
fn classify(err: reqwest::Error) -> TransportFailure {
    let rendered = render_chain(&err);

    if err.is_timeout() {
        return TransportFailure::Timeout(rendered);
    }
    if refused_in_chain(&err) || (err.is_connect() && mentions_refused(&rendered)) {
        return TransportFailure::ConnectionRefused(rendered);
    }
    TransportFailure::Other(rendered)
}

fn refused_in_chain(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        current = e.source();
    }
    false
}

fn mentions_refused(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    text.contains("connection refused") || text.contains("econnrefused")
}

fn render_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        out.push_str(": ");
        out.push_str(&e.to_string());
        current = e.source();
    }
    out
}
