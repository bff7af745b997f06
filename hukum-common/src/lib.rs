//! Hukum Chat Common Types
//!
//! Shared types used by the gateway and by anything that talks to it.

pub mod chat;
pub mod frame;

pub use chat::{ChatRequest, ChatResponse, InboundMessage, Source};
pub use frame::{FinishReason, FrameError, StreamFrame};
