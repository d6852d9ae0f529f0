//! CompanionX - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use config::{ConfigLoader, ConfigProvider, ConfigValidator};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

mod api;
mod app;
mod guard;
mod logging;

use app::Application;

/// CompanionX application host
#[derive(Debug, Parser)]
#[command(name = "companionx", version, about)]
struct Cli {
    /// Configuration file
    #[arg(long, env = "CONFIG_PATH", default_value = "config.yaml")]
    config: PathBuf,

    /// Validate the configuration, print a report and exit
    #[arg(long)]
    check: bool,

    /// Write an example configuration file to this path and exit
    #[arg(long, value_name = "PATH")]
    write_example: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    if let Some(path) = cli.write_example {
        ConfigLoader::create_example(&path)?;
        println!("Example configuration written to {}", path.display());
        return Ok(());
    }

    if cli.check {
        return check_config(&cli.config);
    }

    // Settings must be complete before anything else starts
    let provider = Arc::new(
        ConfigProvider::load(&cli.config).context("Failed to load configuration")?,
    );

    logging::init_logging(&provider.config().logging)?;

    info!("Starting CompanionX v{}", env!("CARGO_PKG_VERSION"));
    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }
    info!("Configuration loaded from: {}", cli.config.display());

    // Loader warnings fire before the subscriber exists; repeat them here
    for issue in ConfigValidator::validate(provider.config()).warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }

    let app = Application::new(provider, &cli.config)
        .context("Failed to create application")?;

    app.run(shutdown_signal()).await?;

    info!("CompanionX shutdown complete");
    Ok(())
}

/// Print every validation issue, failing if any is an error
fn check_config(path: &std::path::Path) -> Result<()> {
    let report = ConfigLoader::check(path)?;

    for issue in &report.errors {
        println!("error: {}: {}", issue.field, issue.message);
    }
    for issue in &report.warnings {
        println!("warning: {}: {}", issue.field, issue.message);
    }
    println!("{}", report.summary());

    if report.has_errors() {
        anyhow::bail!("Configuration {} is invalid", path.display());
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
