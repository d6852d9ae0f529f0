//! Configuration validation utilities

use crate::schema::Config;
use secrecy::ExposeSecret;
use types::{utils, ConfigError, SameSite};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_app(config, &mut report);
        Self::validate_geocoding(config, &mut report);
        Self::validate_session(config, &mut report);
        Self::validate_logging(config, &mut report);
        Self::validate_video(config, &mut report);
        Self::validate_server(config, &mut report);

        // Cross-validation checks
        Self::validate_cross_dependencies(config, &mut report);

        report
    }

    fn validate_app(config: &Config, report: &mut ValidationReport) {
        if config.app.name.trim().is_empty() {
            report.add_error("app.name", "Application name cannot be empty");
        }

        if config.app.url.is_empty() {
            report.add_error("app.url", "Application URL cannot be empty");
        } else if !utils::is_http_url(&config.app.url) {
            report.add_error(
                "app.url",
                &format!("Application URL must be an absolute http(s) URL: {}", config.app.url),
            );
        }

        if !utils::is_valid_timezone_name(&config.app.timezone) {
            report.add_error(
                "app.timezone",
                &format!("Invalid IANA timezone name: {}", config.app.timezone),
            );
        }
    }

    fn validate_geocoding(config: &Config, report: &mut ValidationReport) {
        let user_agent = config.geocoding.user_agent.expose_secret();
        if user_agent.trim().is_empty() {
            report.add_error("geocoding.user_agent", "Geocoding user agent cannot be empty");
        } else if !utils::contains_contact_email(user_agent) {
            report.add_error(
                "geocoding.user_agent",
                "Geocoding user agent must include a contact e-mail address",
            );
        }

        if !utils::is_http_url(&config.geocoding.base_url) {
            report.add_error("geocoding.base_url", "Geocoding base URL must be an absolute http(s) URL");
        } else if !config.geocoding.base_url.starts_with("https://") {
            report.add_warning("geocoding.base_url", "Geocoding base URL should use HTTPS");
        }
    }

    fn validate_session(config: &Config, report: &mut ValidationReport) {
        let session = &config.session;

        if !session.cookie_http_only {
            report.add_warning(
                "session.cookie_http_only",
                "Session cookie is readable from scripts",
            );
        }

        if session.cookie_same_site == SameSite::None && !session.cookie_secure {
            report.add_error(
                "session.cookie_same_site",
                "SameSite=None requires session.cookie_secure to be enabled",
            );
        }
    }

    fn validate_logging(config: &Config, report: &mut ValidationReport) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            report.add_error(
                "logging.level",
                &format!("Invalid log level: {}. Valid levels: {:?}", config.logging.level, valid_levels),
            );
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&config.logging.format.as_str()) {
            report.add_error(
                "logging.format",
                &format!("Invalid log format: {}. Valid formats: {:?}", config.logging.format, valid_formats),
            );
        }

        if config.logging.level == "trace" || config.logging.level == "debug" {
            report.add_warning("logging.level", "Debug/trace logging may impact performance in production");
        }

        let path = &config.logging.error_log_path;
        if path.as_os_str().is_empty() {
            report.add_error("logging.error_log_path", "Error log path cannot be empty");
        } else if !path.is_absolute() {
            report.add_error(
                "logging.error_log_path",
                &format!("Error log path must be absolute: {}", path.display()),
            );
        } else if let Some(parent) = path.parent() {
            if !parent.exists() {
                report.add_warning("logging.error_log_path", "Error log directory does not exist");
            }
        }
    }

    fn validate_video(config: &Config, report: &mut ValidationReport) {
        let app_id = config.video.app_id.expose_secret();
        if app_id.is_empty() {
            report.add_error("video.app_id", "Video application id cannot be empty");
        } else if !utils::is_hex_app_id(app_id) {
            report.add_error("video.app_id", "Video application id must be 32 hexadecimal characters");
        }

        if let Some(ref certificate) = config.video.app_certificate {
            if !utils::is_hex_app_id(certificate.expose_secret()) {
                report.add_error(
                    "video.app_certificate",
                    "Video application certificate must be 32 hexadecimal characters",
                );
            }
        } else {
            report.add_warning(
                "video.app_certificate",
                "No video application certificate configured, call tokens cannot be issued",
            );
        }
    }

    fn validate_server(config: &Config, report: &mut ValidationReport) {
        if config.server.port == 0 {
            report.add_error("server.port", "Server port cannot be 0");
        } else if config.server.port < 1024 {
            report.add_warning("server.port", "Server port is below 1024, may require elevated privileges");
        }

        if config.server.request_timeout_seconds == 0 {
            report.add_error("server.request_timeout_seconds", "Request timeout cannot be 0");
        } else if config.server.request_timeout_seconds > 300 {
            report.add_warning("server.request_timeout_seconds", "Request timeout is very high");
        }

        if config.server.host.is_empty() {
            report.add_error("server.host", "Server host cannot be empty");
        }

        if let Some(ref dir) = config.server.public_dir {
            if !dir.is_dir() {
                report.add_warning(
                    "server.public_dir",
                    &format!("Public directory does not exist: {}", dir.display()),
                );
            }
        }
    }

    fn validate_cross_dependencies(config: &Config, report: &mut ValidationReport) {
        // Secure cookies are never sent back over plain HTTP
        if config.session.cookie_secure && !config.server.tls_terminated {
            report.add_error(
                "session.cookie_secure",
                "Secure session cookies require TLS termination (server.tls_terminated)",
            );
        }

        if config.app.url.starts_with("https://") && !config.session.cookie_secure {
            report.add_warning(
                "session.cookie_secure",
                "Application is served over HTTPS but the session cookie is not marked secure",
            );
        }

        if config.app.url.starts_with("http://") && !utils::is_local_url(&config.app.url) {
            report.add_warning("app.url", "Public application URL does not use HTTPS");
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }

    /// First error as a `ConfigError`, if any
    pub fn into_result(self) -> Result<Self, ConfigError> {
        match self.errors.first() {
            Some(issue) => Err(ConfigError::ValidationError {
                field: issue.field.clone(),
                message: issue.message.clone(),
            }),
            None => Ok(self),
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        let mut config = Config::example();
        config.app.url = "http://localhost/companion".to_string();
        config.video.app_id = Secret::new("f713b3dd3d814d968da39ac2748b8eea".to_string());
        config.video.app_certificate = Some(Secret::new("0123456789abcdef0123456789abcdef".to_string()));
        config.logging.error_log_path = std::env::temp_dir().join("companionx-error.log");
        config
    }

    fn error_fields(report: &ValidationReport) -> Vec<&str> {
        report.errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_config() {
        let report = ConfigValidator::validate(&valid_config());
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[test]
    fn test_example_needs_app_id() {
        let report = ConfigValidator::validate(&Config::example());
        assert!(error_fields(&report).contains(&"video.app_id"));
    }

    #[test]
    fn test_user_agent_requires_contact() {
        let mut config = valid_config();
        config.geocoding.user_agent = Secret::new("CompanionX/1.0".to_string());
        let report = ConfigValidator::validate(&config);
        assert_eq!(error_fields(&report), vec!["geocoding.user_agent"]);
    }

    #[test]
    fn test_secret_values_not_in_messages() {
        let mut config = valid_config();
        config.video.app_id = Secret::new("not-a-hex-app-id".to_string());
        let report = ConfigValidator::validate(&config);
        assert!(report.has_errors());
        assert!(report
            .errors
            .iter()
            .all(|e| !e.message.contains("not-a-hex-app-id")));
    }

    #[test]
    fn test_secure_cookie_requires_tls() {
        let mut config = valid_config();
        config.session.cookie_secure = true;
        let report = ConfigValidator::validate(&config);
        assert_eq!(error_fields(&report), vec!["session.cookie_secure"]);

        config.server.tls_terminated = true;
        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());
    }

    #[test]
    fn test_same_site_none_requires_secure() {
        let mut config = valid_config();
        config.session.cookie_same_site = SameSite::None;
        let report = ConfigValidator::validate(&config);
        assert!(error_fields(&report).contains(&"session.cookie_same_site"));
    }

    #[test]
    fn test_relative_error_log_path() {
        let mut config = valid_config();
        config.logging.error_log_path = PathBuf::from("logs/error.log");
        let report = ConfigValidator::validate(&config);
        assert_eq!(error_fields(&report), vec!["logging.error_log_path"]);
    }

    #[test]
    fn test_invalid_timezone_and_url() {
        let mut config = valid_config();
        config.app.timezone = "Moon/Base".to_string();
        config.app.url = "localhost/companion".to_string();
        let report = ConfigValidator::validate(&config);
        let fields = error_fields(&report);
        assert!(fields.contains(&"app.url"));
        assert!(!fields.contains(&"app.timezone"));

        config.app.timezone = "not a zone".to_string();
        let report = ConfigValidator::validate(&config);
        assert!(error_fields(&report).contains(&"app.timezone"));
    }

    #[test]
    fn test_warnings() {
        let mut config = valid_config();
        config.app.url = "https://companionx.org".to_string();
        config.session.cookie_http_only = false;
        config.video.app_certificate = None;
        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid());

        let warned: Vec<_> = report.warnings.iter().map(|w| w.field.as_str()).collect();
        assert!(warned.contains(&"session.cookie_http_only"));
        assert!(warned.contains(&"session.cookie_secure"));
        assert!(warned.contains(&"video.app_certificate"));
    }

    #[test]
    fn test_single_field_errors() {
        let cases: [(&str, fn(&mut Config)); 8] = [
            ("app.name", |c: &mut Config| c.app.name = "  ".to_string()),
            ("geocoding.base_url", |c: &mut Config| {
                c.geocoding.base_url = "ftp://nominatim.openstreetmap.org".to_string()
            }),
            ("logging.level", |c: &mut Config| c.logging.level = "verbose".to_string()),
            ("logging.format", |c: &mut Config| c.logging.format = "xml".to_string()),
            ("server.port", |c: &mut Config| c.server.port = 0),
            ("server.request_timeout_seconds", |c: &mut Config| c.server.request_timeout_seconds = 0),
            ("server.host", |c: &mut Config| c.server.host = String::new()),
            ("video.app_certificate", |c: &mut Config| {
                c.video.app_certificate = Some(Secret::new("your_agora_app_certificate".to_string()))
            }),
        ];

        for (field, mutate) in cases {
            let mut config = valid_config();
            mutate(&mut config);
            let report = ConfigValidator::validate(&config);
            assert_eq!(error_fields(&report), vec![field], "case {}", field);
        }
    }

    #[test]
    fn test_missing_directories_warn() {
        let mut config = valid_config();
        config.logging.error_log_path = PathBuf::from("/nonexistent-companionx/logs/error.log");
        config.server.public_dir = Some(PathBuf::from("/nonexistent-companionx/public"));

        let report = ConfigValidator::validate(&config);
        assert!(report.is_valid(), "{:?}", report.errors);

        let warned: Vec<_> = report.warnings.iter().map(|w| w.field.as_str()).collect();
        assert!(warned.contains(&"logging.error_log_path"));
        assert!(warned.contains(&"server.public_dir"));
    }

    #[test]
    fn test_into_result() {
        let report = ConfigValidator::validate(&Config::example());
        let err = report.into_result().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));

        assert!(ConfigValidator::validate(&valid_config()).into_result().is_ok());
    }
}
