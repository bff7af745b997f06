//! Backend client with cold-start retries.

use std::sync::Arc;

use hukum_common::ChatRequest;
use tokio::time::{sleep, timeout};

use super::{BackendReply, BackendTransport, TransportFailure};
use crate::error::{Error, Result};
use crate::profile::RequestProfile;

/// Sends canonical requests to the backend under a [`RequestProfile`].
///
/// Only connection-refused failures are retried, and only when the profile
/// carries a retry policy. Status errors are terminal on the first attempt.
#[derive(Clone)]
pub struct ResilientClient {
    transport: Arc<dyn BackendTransport>,
}

impl ResilientClient {
    pub fn new(transport: Arc<dyn BackendTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn BackendTransport> {
        &self.transport
    }

    /// Send `request`, bounded by the profile deadline.
    pub async fn send(&self, request: &ChatRequest, profile: &RequestProfile) -> Result<BackendReply> {
        let deadline = profile.deadline();
        match timeout(deadline, self.send_with_retries(request, profile)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Backend call exceeded deadline of {:?}", deadline);
                Err(Error::Timeout(format!(
                    "backend call exceeded {}s",
                    deadline.as_secs()
                )))
            }
        }
    }

    async fn send_with_retries(
        &self,
        request: &ChatRequest,
        profile: &RequestProfile,
    ) -> Result<BackendReply> {
        let Some(retry) = profile.retry else {
            return self
                .transport
                .post_chat(request)
                .await
                .map_err(|failure| fatal(failure, false));
        };

        let mut last_error = String::new();
        for attempt in 1..=retry.max_attempts {
            match self.transport.post_chat(request).await {
                Ok(reply) => {
                    if attempt > 1 {
                        tracing::info!("Backend answered on attempt {}", attempt);
                    }
                    return Ok(reply);
                }
                Err(TransportFailure::ConnectionRefused(message)) => {
                    last_error = message;
                    if attempt < retry.max_attempts {
                        tracing::warn!(
                            attempt,
                            max_attempts = retry.max_attempts,
                            delay_ms = retry.delay_ms,
                            "Backend refused connection, still loading? Retrying"
                        );
                        sleep(retry.delay()).await;
                    }
                }
                Err(failure) => return Err(fatal(failure, true)),
            }
        }

        tracing::error!(
            "Backend still refusing connections after {} attempts: {}",
            retry.max_attempts,
            last_error
        );
        Err(Error::BackendUnready {
            attempts: retry.max_attempts,
            last_error,
        })
    }
}

/// Map a non-retried failure onto the gateway error taxonomy.
fn fatal(failure: TransportFailure, retrying: bool) -> Error {
    match failure {
        TransportFailure::Status { status, body } => {
            tracing::error!("Backend returned {}: {}", status, body);
            Error::Backend { status, body }
        }
        // Without a retry policy a refused connection is a plain transport error.
        TransportFailure::ConnectionRefused(message) if !retrying => {
            Error::Transport(format!("Connection refused: {}", message))
        }
        // Error::Timeout is reserved for the profile deadline; a connect
        // timeout inside one attempt lands here.
        other => Error::Transport(other.to_string()),
    }
}
