//! Simulated streaming of a fully materialized answer.
//!
//! The backend answers in one piece. [`adapt`] replays that text to the UI
//! one character per frame through a bounded channel, paced by a fixed delay.
//! Dropping the returned stream closes the channel and stops the producer.

use std::time::Duration;

use hukum_common::StreamFrame;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tokio_stream::wrappers::ReceiverStream;
use tracing::Instrument;

const CHANNEL_CAPACITY: usize = 32;

/// Pacing parameters for one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPacing {
    /// Delay after each text fragment. Zero disables pacing.
    pub frame_delay: Duration,
    /// Hard limit on the stream's wall-clock duration. When pacing would run
    /// past it the stream ends with an `Error` frame instead of `Done`.
    pub max_duration: Option<Duration>,
}

impl StreamPacing {
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            frame_delay,
            max_duration: None,
        }
    }

    /// No delay and no limit, for non-interactive consumers.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }
}

/// Turn `text` into a finite, ordered stream of frames.
///
/// Emits one `TextFragment` per `char`, then exactly one terminal frame.
/// Must be called inside a tokio runtime. The producer task inherits the
/// caller's span.
pub fn adapt(text: String, pacing: StreamPacing) -> ReceiverStream<StreamFrame> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    tokio::spawn(produce(text, pacing, tx).in_current_span());
    ReceiverStream::new(rx)
}

async fn produce(text: String, pacing: StreamPacing, tx: mpsc::Sender<StreamFrame>) {
    let deadline = pacing.max_duration.map(|d| Instant::now() + d);
    let mut sent = 0usize;

    for ch in text.chars() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            tracing::warn!(sent, "Stream exceeded its time budget, aborting");
            let _ = tx
                .send(StreamFrame::Error("stream exceeded its time budget".to_string()))
                .await;
            return;
        }

        if tx.send(StreamFrame::TextFragment(ch.to_string())).await.is_err() {
            tracing::debug!(sent, "Stream consumer went away, stopping");
            return;
        }
        sent += 1;

        if !pacing.frame_delay.is_zero() {
            sleep(pacing.frame_delay).await;
        }
    }

    if tx.send(StreamFrame::stop()).await.is_err() {
        tracing::debug!(sent, "Stream consumer went away before the final frame");
        return;
    }
    tracing::debug!(sent, "Stream finished");
}
