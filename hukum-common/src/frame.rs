//! Line-oriented streaming protocol spoken to the chat UI.
//!
//! Each frame is one line of the form `<tag>:<json>\n`:
//!
//! - `0:"H"` - a text fragment, the payload is a JSON string
//! - `3:"message"` - an error, terminal
//! - `d:{"finishReason":"stop"}` - end of stream, terminal
//!
//! Exactly one terminal frame ends a stream and nothing follows it.

use serde::{Deserialize, Serialize};

const TEXT_TAG: &str = "0";
const ERROR_TAG: &str = "3";
const DONE_TAG: &str = "d";

/// Why a stream finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishReason {
    Stop,
}

/// A single frame of a chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    TextFragment(String),
    Done(FinishReason),
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Malformed frame: {0}")]
    Malformed(String),
    #[error("Unknown frame tag: {0}")]
    UnknownTag(String),
    #[error("Invalid frame payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct FinishPart {
    #[serde(rename = "finishReason")]
    finish_reason: FinishReason,
}

impl StreamFrame {
    pub fn text(fragment: impl Into<String>) -> Self {
        StreamFrame::TextFragment(fragment.into())
    }

    pub fn stop() -> Self {
        StreamFrame::Done(FinishReason::Stop)
    }

    /// Terminal frames end the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamFrame::TextFragment(_))
    }

    /// Encode the frame as a wire line, trailing newline included.
    pub fn encode(&self) -> String {
        // Serializing a string or a plain struct cannot fail.
        let (tag, payload) = match self {
            StreamFrame::TextFragment(text) => (TEXT_TAG, json_string(text)),
            StreamFrame::Error(message) => (ERROR_TAG, json_string(message)),
            StreamFrame::Done(reason) => (
                DONE_TAG,
                serde_json::to_string(&FinishPart {
                    finish_reason: *reason,
                })
                .unwrap_or_default(),
            ),
        };
        format!("{}:{}\n", tag, payload)
    }

    /// Decode one wire line. A trailing newline is accepted.
    pub fn parse_line(line: &str) -> Result<Self, FrameError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let (tag, payload) = line
            .split_once(':')
            .ok_or_else(|| FrameError::Malformed(line.to_string()))?;

        match tag {
            TEXT_TAG => Ok(StreamFrame::TextFragment(serde_json::from_str(payload)?)),
            ERROR_TAG => Ok(StreamFrame::Error(serde_json::from_str(payload)?)),
            DONE_TAG => {
                let part: FinishPart = serde_json::from_str(payload)?;
                Ok(StreamFrame::Done(part.finish_reason))
            }
            other => Err(FrameError::UnknownTag(other.to_string())),
        }
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
