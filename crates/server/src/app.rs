//! Main application structure and lifecycle management

use crate::{api::ApiServer, guard::DirectAccessGuard};
use anyhow::{Context, Result};
use config::ConfigProvider;
use std::{path::Path, sync::Arc};
use tracing::info;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub provider: Arc<ConfigProvider>,
    pub guard: DirectAccessGuard,
}

impl AppState {
    pub fn new(provider: Arc<ConfigProvider>, config_path: &Path) -> Self {
        Self {
            provider,
            guard: DirectAccessGuard::for_config_file(config_path),
        }
    }
}

/// Main application that coordinates all components
pub struct Application {
    state: Arc<AppState>,
    api_server: ApiServer,
}

impl Application {
    /// Create a new application instance
    pub fn new(provider: Arc<ConfigProvider>, config_path: &Path) -> Result<Self> {
        info!("Initializing application components...");

        let state = Arc::new(AppState::new(provider, config_path));
        info!(protected = ?state.guard.protected(), "Direct-access guard configured");

        let api_server = ApiServer::new(state.clone())
            .context("Failed to create API server")?;

        info!("Application components initialized successfully");

        Ok(Self { state, api_server })
    }

    /// Run the application until the shutdown future resolves
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let public = self.state.provider.public_settings();
        info!(app = %public.name, url = %public.url, timezone = %public.timezone, "Starting application services...");

        self.api_server.run(shutdown).await.context("API server error")?;

        info!("Application shutdown complete");
        Ok(())
    }
}
