//! Request normalization.
//!
//! The UI sends either a raw question or a conversational message list. Both
//! collapse into a single canonical [`ChatRequest`] for the backend.

use hukum_common::{ChatRequest, InboundMessage};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::profile::RequestProfile;

/// Body accepted by the extended entry point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtendedRequest {
    #[serde(default)]
    pub pertanyaan: Option<String>,
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

/// Body accepted by the interactive entry point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractiveRequest {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

/// Build the canonical backend request.
///
/// A non-empty `question` wins and is used verbatim. Otherwise the content of
/// the last `user` message is used. Whitespace-only text counts as empty.
pub fn normalize(
    question: Option<&str>,
    messages: &[InboundMessage],
    profile: &RequestProfile,
) -> Result<ChatRequest> {
    let question = question
        .filter(|q| !q.trim().is_empty())
        .or_else(|| {
            messages
                .iter()
                .rev()
                .find(|m| m.is_user())
                .map(|m| m.content.as_str())
                .filter(|c| !c.trim().is_empty())
        })
        .ok_or_else(|| Error::Validation("no user message found".to_string()))?;

    Ok(ChatRequest {
        question: question.to_string(),
        top_k: profile.top_k,
        max_tokens: profile.max_tokens,
        temperature: profile.temperature,
        include_context: profile.include_context,
    })
}

impl ExtendedRequest {
    pub fn normalize(&self, profile: &RequestProfile) -> Result<ChatRequest> {
        normalize(self.pertanyaan.as_deref(), &self.messages, profile)
    }
}

impl InteractiveRequest {
    pub fn normalize(&self, profile: &RequestProfile) -> Result<ChatRequest> {
        normalize(None, &self.messages, profile)
    }
}
