//! HTTP routes.

pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the router for all entry points.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(chat::router())
        .merge(health::router())
}
