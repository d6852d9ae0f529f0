//! HTTP API server implementation

use crate::api::{middleware, routes};
use crate::app::AppState;
use anyhow::{Context, Result};
use axum::Router;
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

/// HTTP API server
pub struct ApiServer {
    app: Router,
    addr: SocketAddr,
}

/// Assemble routes, static content and layers.
///
/// The direct-access guard wraps the fallback as well, so static files are
/// checked before they are served.
pub fn build_router(state: Arc<AppState>) -> Router {
    let server = &state.provider.config().server;

    let mut router = routes::create_routes();
    if let Some(ref dir) = server.public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::deny_direct_access,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .with_state(state)
}

impl ApiServer {
    /// Create a new API server
    pub fn new(state: Arc<AppState>) -> Result<Self> {
        let server = &state.provider.config().server;

        // Parse server address
        let addr: SocketAddr = format!("{}:{}", server.host, server.port)
            .parse()
            .context("Invalid server host/port configuration")?;

        if let Some(ref dir) = server.public_dir {
            info!("Serving static content from {}", dir.display());
        }

        let app = build_router(state);

        info!("API server configured for {}", addr);

        Ok(Self { app, addr })
    }

    /// Run the API server until `shutdown` resolves
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr)
            .await
            .context("Failed to bind to server address")?;

        info!("API server listening on {}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("API server error")?;

        info!("API server shutdown complete");
        Ok(())
    }
}
