//! Configuration schema definitions

use secrecy::{ExposeSecret, Secret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use types::{SameSite, SessionCookiePolicy, REDACTED};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application identity
    pub app: AppConfig,
    /// Geocoding provider settings
    pub geocoding: GeocodingConfig,
    /// Session cookie policy
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Video-calling provider settings
    pub video: VideoConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display name
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Absolute base URL, differs per deployment
    pub url: String,
    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// User-Agent sent to the geocoding service; must carry a contact address
    #[serde(serialize_with = "serialize_redacted")]
    pub user_agent: SecretString,
    /// Geocoding service base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
}

/// Session cookie policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Only send the cookie over TLS
    #[serde(default = "default_false")]
    pub cookie_secure: bool,
    /// Hide the cookie from scripts
    #[serde(default = "default_true")]
    pub cookie_http_only: bool,
    /// Cross-site policy
    #[serde(default)]
    pub cookie_same_site: SameSite,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// File receiving warnings and errors
    pub error_log_path: PathBuf,
}

/// Video-calling provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Provider application id
    #[serde(serialize_with = "serialize_redacted")]
    pub app_id: SecretString,
    /// Provider certificate used by token issuance
    #[serde(default, serialize_with = "serialize_redacted_opt")]
    pub app_certificate: Option<SecretString>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// TLS is terminated by this server or a fronting proxy
    #[serde(default = "default_false")]
    pub tls_terminated: bool,
    /// Directory served as static content (optional)
    pub public_dir: Option<PathBuf>,
}

// Default value functions
fn default_app_name() -> String {
    "CompanionX".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn serialize_redacted<S: Serializer>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

fn serialize_redacted_opt<S: Serializer>(
    value: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_str(REDACTED),
        None => serializer.serialize_none(),
    }
}

impl Config {
    /// Template with every field filled in. Secrets and deployment-specific
    /// values are placeholders that must be replaced before use.
    pub fn example() -> Self {
        Self {
            app: AppConfig {
                name: default_app_name(),
                url: "https://companionx.example.org".to_string(),
                timezone: default_timezone(),
            },
            geocoding: GeocodingConfig {
                user_agent: Secret::new("CompanionX/1.0 (ops@companionx.example.org)".to_string()),
                base_url: default_geocoding_base_url(),
            },
            session: SessionConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
                error_log_path: PathBuf::from("/var/log/companionx/error.log"),
            },
            video: VideoConfig {
                app_id: Secret::new(String::new()),
                app_certificate: None,
            },
            server: ServerConfig::default(),
        }
    }

    /// Cookie attributes for the session layer
    pub fn session_cookie_policy(&self) -> SessionCookiePolicy {
        SessionCookiePolicy {
            secure: self.session.cookie_secure,
            http_only: self.session.cookie_http_only,
            same_site: self.session.cookie_same_site,
        }
    }

    /// Whether the video provider certificate is configured
    pub fn has_video_certificate(&self) -> bool {
        self.video
            .app_certificate
            .as_ref()
            .is_some_and(|c| !c.expose_secret().is_empty())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_secure: default_false(),
            cookie_http_only: default_true(),
            cookie_same_site: SameSite::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            tls_terminated: default_false(),
            public_dir: None,
        }
    }
}
