//! HTTP middleware implementations

use crate::app::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

/// Refuse requests that target a configuration source directly.
///
/// Any method gets a bare 403 and the inner service is never called.
pub async fn deny_direct_access(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Err(e) = state.guard.check(request.uri().path()) {
        warn!(method = %request.method(), error = %e, "Rejected direct request");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
