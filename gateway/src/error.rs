//! Error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Everything a chat entry point can fail with.
///
/// Backend reachability is classified by the backend client only; handlers
/// just map the variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No question could be extracted from the inbound request.
    #[error("{0}")]
    Validation(String),

    /// The backend refused connections for every allowed attempt.
    #[error("Backend not ready after {attempts} attempt(s): {last_error}")]
    BackendUnready { attempts: u32, last_error: String },

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::BackendUnready { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::Backend { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, stable category shown as `error` in response bodies.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Validation(_) => "Invalid request",
            Error::BackendUnready { .. } => "Backend sedang loading",
            Error::Backend { .. } => "Backend error",
            Error::Timeout(_) => "Request timeout",
            Error::Transport(_) => "Internal server error",
        }
    }

    /// Operator-facing diagnostic text.
    pub fn details(&self) -> String {
        match self {
            Error::Backend { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Error::Validation(message) => json!({ "error": message }),
            other => json!({
                "error": other.category(),
                "details": other.details(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::Validation("no user message found".into()), 400)]
    #[case(Error::BackendUnready { attempts: 5, last_error: "refused".into() }, 503)]
    #[case(Error::Backend { status: 422, body: "bad".into() }, 422)]
    #[case(Error::Backend { status: 1000, body: "weird".into() }, 502)]
    #[case(Error::Timeout("deadline".into()), 504)]
    #[case(Error::Transport("reset".into()), 500)]
    fn test_status_mapping(#[case] error: Error, #[case] expected: u16) {
        assert_eq!(error.status_code().as_u16(), expected);
    }

    #[test]
    fn test_backend_details_are_raw_body() {
        let error = Error::Backend {
            status: 500,
            body: "{\"detail\":\"Pipeline belum diinisialisasi\"}".into(),
        };
        assert_eq!(error.details(), "{\"detail\":\"Pipeline belum diinisialisasi\"}");
        assert_eq!(error.category(), "Backend error");
    }

    #[test]
    fn test_unready_category() {
        let error = Error::BackendUnready {
            attempts: 5,
            last_error: "connection refused".into(),
        };
        assert_eq!(error.category(), "Backend sedang loading");
        assert!(error.details().contains("5 attempt(s)"));
        assert!(error.details().contains("connection refused"));
    }
}
