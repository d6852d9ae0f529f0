//! API route definitions

use crate::api::handlers;
use crate::app::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create the main API router
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health and status endpoints
        .route("/healthz", get(handlers::health_check))
        .route("/status", get(handlers::system_status))
}
