//! Helpers shared by unit and integration tests.

pub mod mock_backend;

use std::net::TcpListener;
use std::sync::Arc;

use crate::config::{BackendConfig, Config};
use crate::profile::{RequestProfile, RetryPolicy};
use crate::AppState;

/// Config pointing at `base_url`, with fast retries and no stream pacing.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config {
        backend: BackendConfig {
            base_url: base_url.to_string(),
            connect_timeout_secs: 2,
        },
        ..Config::default()
    };
    config.stream.frame_delay_ms = 0;
    config.profiles.extended = fast_extended(20);
    config
}

/// The extended profile with `delay_ms` between attempts instead of 8s.
pub fn fast_extended(delay_ms: u64) -> RequestProfile {
    RequestProfile {
        retry: Some(RetryPolicy {
            max_attempts: 5,
            delay_ms,
        }),
        ..RequestProfile::extended()
    }
}

/// App state using the real HTTP transport against `base_url`.
pub fn create_test_state(base_url: &str) -> Arc<AppState> {
    Arc::new(AppState::from_config(test_config(base_url)).expect("Failed to build test state"))
}

/// URL of a local port nothing listens on, so connections are refused.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe socket");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}", addr)
}
