//! Chat types exchanged with the RAG backend.
//!
//! The backend speaks Indonesian field names on the wire (`pertanyaan`,
//! `jawaban`, `sumber`, ...). The Rust side uses English names and maps them
//! with serde renames.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical request sent to the backend `POST /chat` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(rename = "pertanyaan")]
    pub question: String,
    pub top_k: u32,
    pub max_tokens: u32,
    pub temperature: f32,
    pub include_context: bool,
}

/// Backend answer with its cited sources.
///
/// Fields the gateway does not know about (for example the backend's
/// `debug_info`) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "jawaban")]
    pub answer: String,
    /// Ordered by relevance, most relevant first.
    #[serde(rename = "sumber", default)]
    pub sources: Vec<Source>,
    #[serde(rename = "konteks", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "pertanyaan", default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A document chunk the backend used to produce an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Opaque document identifier, often a file path.
    #[serde(rename = "source")]
    pub origin: String,
    #[serde(default, deserialize_with = "page_number")]
    pub page: Option<u32>,
    #[serde(default)]
    pub doc_type: Option<String>,
    /// Fusion/relevance score, conventionally in 0..=1.
    #[serde(default)]
    pub score: f64,
    /// Which retrieval path produced this hit (lexical, semantic, hybrid...).
    #[serde(rename = "retrieval_source", default)]
    pub retrieval_channel: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a conversational message list sent by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl Source {
    pub fn new(origin: impl Into<String>, page: u32, score: f64) -> Self {
        Self {
            origin: origin.into(),
            page: Some(page),
            doc_type: None,
            score,
            retrieval_channel: String::new(),
            extra: Map::new(),
        }
    }
}

/// Page numbers copied out of vector-store metadata arrive as floats
/// (`12.0`). Integral values are accepted in either form.
fn page_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(page) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if page.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&page) {
        Ok(Some(page as u32))
    } else {
        Err(de::Error::custom(format!("invalid page number: {}", page)))
    }
}

impl InboundMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}
