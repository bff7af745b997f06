//! Request-shaping profiles.
//!
//! Each entry point owns one immutable profile: the defaults stamped onto the
//! canonical backend request, the retry policy of the backend client and the
//! overall deadline of the call.

use std::time::Duration;

use serde::Deserialize;

/// Retry policy for backend cold starts.
///
/// Only connection-refused failures are retried, with a flat delay between
/// attempts. The delay is tuned to the backend's model-loading window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Defaults and policy for one entry point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestProfile {
    pub top_k: u32,
    pub max_tokens: u32,
    pub temperature: f32,
    pub include_context: bool,
    /// Upper bound on the whole backend call, retries included.
    pub deadline_secs: u64,
    /// `None` means a single attempt with no cold-start classification.
    #[serde(default)]
    pub retry: Option<RetryPolicy>,
}

impl RequestProfile {
    /// Long-running JSON entry point: large answers, waits out cold starts.
    pub fn extended() -> Self {
        Self {
            top_k: 5,
            max_tokens: 2048,
            temperature: 0.5,
            include_context: false,
            deadline_secs: 300,
            retry: Some(RetryPolicy {
                max_attempts: 5,
                delay_ms: 8_000,
            }),
        }
    }

    /// Quick streaming entry point: shorter answers, one attempt.
    pub fn interactive() -> Self {
        Self {
            top_k: 5,
            max_tokens: 800,
            temperature: 0.7,
            include_context: false,
            deadline_secs: 60,
            retry: None,
        }
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    pub fn max_attempts(&self) -> u32 {
        self.retry.map(|r| r.max_attempts).unwrap_or(1)
    }

    /// Check the profile produces valid backend requests.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_k < 1 {
            return Err("top_k must be at least 1".to_string());
        }
        if self.max_tokens < 1 {
            return Err("max_tokens must be at least 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            ));
        }
        if self.deadline_secs == 0 {
            return Err("deadline_secs must be positive".to_string());
        }
        if let Some(retry) = self.retry {
            if retry.max_attempts < 1 {
                return Err("retry.max_attempts must be at least 1".to_string());
            }
        }
        Ok(())
    }
}
