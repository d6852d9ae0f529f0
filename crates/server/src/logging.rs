//! Logging bootstrap driven by the loaded configuration

use anyhow::{Context, Result};
use config::LoggingConfig;
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing::{info, warn, Subscriber};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Initialize stdout logging plus the error log file.
///
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(error_log_layer(&config.error_log_path)?);

    match config.format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    info!("Logging initialized");
    info!("Log level: {}", config.level);
    info!("Log format: {}", config.format);
    info!("Error log: {}", config.error_log_path.display());

    if config.level == "trace" || config.level == "debug" {
        warn!("Debug/trace logging enabled - may impact performance in production");
    }

    Ok(())
}

/// Layer appending warnings and errors to `path` as JSON lines.
///
/// Missing parent directories are created.
pub fn error_log_layer<S>(path: &Path) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create error log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open error log {}", path.display()))?;

    Ok(tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::WARN))
}
