//! Named settings and their typed values

use crate::error::ConfigError;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Placeholder printed instead of sensitive values
pub const REDACTED: &str = "[REDACTED]";

/// The fixed set of settings exposed to collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    GeocodingUserAgent,
    AppName,
    AppUrl,
    AppTimezone,
    SessionCookieSecure,
    SessionCookieHttpOnly,
    SessionCookieSameSite,
    ErrorLogPath,
    VideoAppId,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::GeocodingUserAgent,
        SettingKey::AppName,
        SettingKey::AppUrl,
        SettingKey::AppTimezone,
        SettingKey::SessionCookieSecure,
        SettingKey::SessionCookieHttpOnly,
        SettingKey::SessionCookieSameSite,
        SettingKey::ErrorLogPath,
        SettingKey::VideoAppId,
    ];

    /// Canonical name, also accepted as an environment variable
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::GeocodingUserAgent => "NOMINATIM_USER_AGENT",
            SettingKey::AppName => "APP_NAME",
            SettingKey::AppUrl => "APP_URL",
            SettingKey::AppTimezone => "APP_TIMEZONE",
            SettingKey::SessionCookieSecure => "SESSION_COOKIE_SECURE",
            SettingKey::SessionCookieHttpOnly => "SESSION_COOKIE_HTTPONLY",
            SettingKey::SessionCookieSameSite => "SESSION_COOKIE_SAMESITE",
            SettingKey::ErrorLogPath => "ERROR_LOG_PATH",
            SettingKey::VideoAppId => "AGORA_APP_ID",
        }
    }

    /// Dotted path of the field in the configuration file
    pub fn field(&self) -> &'static str {
        match self {
            SettingKey::GeocodingUserAgent => "geocoding.user_agent",
            SettingKey::AppName => "app.name",
            SettingKey::AppUrl => "app.url",
            SettingKey::AppTimezone => "app.timezone",
            SettingKey::SessionCookieSecure => "session.cookie_secure",
            SettingKey::SessionCookieHttpOnly => "session.cookie_http_only",
            SettingKey::SessionCookieSameSite => "session.cookie_same_site",
            SettingKey::ErrorLogPath => "logging.error_log_path",
            SettingKey::VideoAppId => "video.app_id",
        }
    }

    /// Values that must never reach client-facing output or error messages
    pub fn is_sensitive(&self) -> bool {
        matches!(self, SettingKey::GeocodingUserAgent | SettingKey::VideoAppId)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownSetting { key: s.to_string() })
    }
}

/// Browser same-site policy for the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            _ => Err(ConfigError::InvalidValue {
                field: "session.cookie_same_site".to_string(),
                value: format!("{} (expected Strict, Lax or None)", s),
            }),
        }
    }
}

impl TryFrom<String> for SameSite {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SameSite> for String {
    fn from(value: SameSite) -> Self {
        value.as_str().to_string()
    }
}

/// Borrowed, typed view of a single setting
#[derive(Debug, Clone, Copy)]
pub enum SettingValue<'a> {
    Text(&'a str),
    Url(&'a str),
    Timezone(&'a str),
    Flag(bool),
    SameSite(SameSite),
    Path(&'a Path),
    Secret(&'a SecretString),
}

impl SettingValue<'_> {
    /// Whether a text-like value is blank. Flags and policies are never empty.
    pub fn is_empty(&self) -> bool {
        use secrecy::ExposeSecret;

        match self {
            SettingValue::Text(s) | SettingValue::Url(s) | SettingValue::Timezone(s) => {
                s.trim().is_empty()
            }
            SettingValue::Path(p) => p.as_os_str().is_empty(),
            SettingValue::Secret(s) => s.expose_secret().trim().is_empty(),
            SettingValue::Flag(_) | SettingValue::SameSite(_) => false,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) | SettingValue::Url(s) | SettingValue::Timezone(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(s) | SettingValue::Url(s) | SettingValue::Timezone(s) => {
                f.write_str(s)
            }
            SettingValue::Flag(b) => write!(f, "{}", b),
            SettingValue::SameSite(s) => write!(f, "{}", s),
            SettingValue::Path(p) => write!(f, "{}", p.display()),
            SettingValue::Secret(_) => f.write_str(REDACTED),
        }
    }
}

/// Cookie attributes the session layer applies to its cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookiePolicy {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl SessionCookiePolicy {
    /// Attribute list for a `Set-Cookie` header, without the name/value pair
    pub fn set_cookie_attributes(&self) -> String {
        let mut attrs = vec!["Path=/".to_string()];
        if self.secure {
            attrs.push("Secure".to_string());
        }
        if self.http_only {
            attrs.push("HttpOnly".to_string());
        }
        attrs.push(format!("SameSite={}", self.same_site));
        attrs.join("; ")
    }
}
