//! Configuration loader implementation

use crate::schema::Config;
use crate::validation::{ConfigValidator, ValidationReport};
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Yaml},
    value::{Uncased, UncasedStr},
    Figment,
};
use std::path::Path;
use tracing::{debug, warn};
use types::{ConfigError, SettingKey};

/// Prefix for nested environment overrides, e.g. `COMPANIONX_SERVER__PORT`
pub const ENV_PREFIX: &str = "COMPANIONX_";

/// Canonical variable holding the video provider certificate
pub const VIDEO_CERTIFICATE_ENV: &str = "AGORA_APP_CERTIFICATE";

/// Configuration loader that handles YAML files and environment variables
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Config> {
        let config_path = config_path.as_ref();

        // Check if config file exists
        if !config_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: config_path.display().to_string(),
            }
            .into());
        }

        let figment = Self::with_env(Figment::new().merge(Yaml::file(config_path)));
        let (config, report) =
            Self::extract(figment).context("Failed to parse configuration")?;

        debug!(path = %config_path.display(), "{}", report.summary());
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn load_from_env() -> Result<Config> {
        let (config, _) = Self::extract(Self::with_env(Figment::new()))
            .context("Failed to parse configuration from environment")?;
        Ok(config)
    }

    /// Load configuration from string (for testing)
    pub fn load_from_str(yaml_content: &str) -> Result<Config> {
        let (config, _) = Self::extract(Figment::new().merge(Yaml::string(yaml_content)))
            .context("Failed to parse configuration from string")?;
        Ok(config)
    }

    /// Load and validate, returning the full report (for `--check`)
    pub fn check<P: AsRef<Path>>(config_path: P) -> Result<ValidationReport> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Err(ConfigError::FileNotFound {
                path: config_path.display().to_string(),
            }
            .into());
        }

        let config: Config = Self::with_env(Figment::new().merge(Yaml::file(config_path)))
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(ConfigValidator::validate(&config))
    }

    /// Layer environment overrides on top of a base figment
    fn with_env(figment: Figment) -> Figment {
        figment
            // Nested overrides (COMPANIONX_SESSION__COOKIE_SECURE)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            // Canonical setting names (APP_URL, AGORA_APP_ID, ...)
            .merge(Env::raw().filter_map(canonical_env_field))
    }

    /// Extract, validate and fail on the first error
    fn extract(figment: Figment) -> Result<(Config, ValidationReport)> {
        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let report = ConfigValidator::validate(&config);
        for issue in &report.warnings {
            warn!(field = %issue.field, "{}", issue.message);
        }

        let report = report.into_result()?;
        Ok((config, report))
    }

    /// Create example configuration file
    pub fn create_example<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Config::example();
        let yaml_content = serde_yaml::to_string(&config)
            .context("Failed to serialize example configuration")?;

        std::fs::write(path.as_ref(), yaml_content)
            .context("Failed to write example configuration file")?;

        Ok(())
    }
}

/// Map a canonical environment variable name onto its schema field
fn canonical_env_field(key: &UncasedStr) -> Option<Uncased<'_>> {
    if key.as_str().eq_ignore_ascii_case(VIDEO_CERTIFICATE_ENV) {
        return Some("video.app_certificate".into());
    }

    SettingKey::ALL
        .into_iter()
        .find(|setting| key.as_str().eq_ignore_ascii_case(setting.name()))
        .map(|setting| setting.field().into())
}
