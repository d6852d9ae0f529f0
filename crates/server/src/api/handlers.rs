//! HTTP API request handlers

use crate::app::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check(
    State(_state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    ))
}

/// Public application settings. Credentials are reported as configured or
/// not, never by value.
pub async fn system_status(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let provider = &state.provider;
    let cookie = provider.session_cookie_policy();

    Ok((
        StatusCode::OK,
        Json(json!({
            "service": "companionx",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "app": provider.public_settings(),
            "session": {
                "secure": cookie.secure,
                "httpOnly": cookie.http_only,
                "sameSite": cookie.same_site.as_str(),
            },
            "integrations": {
                "geocoding": "configured",
                "videoTokens": if provider.config().has_video_certificate() { "enabled" } else { "disabled" },
            }
        })),
    ))
}
