//! Read-only access to loaded settings

use crate::loader::ConfigLoader;
use crate::schema::Config;
use anyhow::Result;
use secrecy::SecretString;
use serde::Serialize;
use std::path::Path;
use types::{ConfigError, SessionCookiePolicy, SettingKey, SettingValue};

/// Immutable settings shared with every collaborator.
///
/// Built once from a validated [`Config`] and handed out behind an `Arc`;
/// there is no way to change a value after construction.
#[derive(Debug)]
pub struct ConfigProvider {
    config: Config,
}

/// Settings that are safe to show to clients
#[derive(Debug, Clone, Serialize)]
pub struct PublicSettings<'a> {
    pub name: &'a str,
    pub url: &'a str,
    pub timezone: &'a str,
}

impl ConfigProvider {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load from a file plus environment and wrap the result
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        Ok(Self::new(ConfigLoader::load(config_path)?))
    }

    /// Value of a setting
    pub fn get(&self, key: SettingKey) -> SettingValue<'_> {
        let config = &self.config;
        match key {
            SettingKey::GeocodingUserAgent => SettingValue::Secret(&config.geocoding.user_agent),
            SettingKey::AppName => SettingValue::Text(&config.app.name),
            SettingKey::AppUrl => SettingValue::Url(&config.app.url),
            SettingKey::AppTimezone => SettingValue::Timezone(&config.app.timezone),
            SettingKey::SessionCookieSecure => SettingValue::Flag(config.session.cookie_secure),
            SettingKey::SessionCookieHttpOnly => {
                SettingValue::Flag(config.session.cookie_http_only)
            }
            SettingKey::SessionCookieSameSite => {
                SettingValue::SameSite(config.session.cookie_same_site)
            }
            SettingKey::ErrorLogPath => SettingValue::Path(&config.logging.error_log_path),
            SettingKey::VideoAppId => SettingValue::Secret(&config.video.app_id),
        }
    }

    /// Value of a setting by canonical name (`APP_URL`, `AGORA_APP_ID`, ...)
    pub fn lookup(&self, name: &str) -> std::result::Result<SettingValue<'_>, ConfigError> {
        let key: SettingKey = name.parse()?;
        Ok(self.get(key))
    }

    pub fn session_cookie_policy(&self) -> SessionCookiePolicy {
        self.config.session_cookie_policy()
    }

    /// User-Agent header value for geocoding requests
    pub fn geocoding_user_agent(&self) -> &SecretString {
        &self.config.geocoding.user_agent
    }

    pub fn geocoding_base_url(&self) -> &str {
        &self.config.geocoding.base_url
    }

    pub fn video_app_id(&self) -> &SecretString {
        &self.config.video.app_id
    }

    pub fn video_app_certificate(&self) -> Option<&SecretString> {
        self.config.video.app_certificate.as_ref()
    }

    pub fn error_log_path(&self) -> &Path {
        &self.config.logging.error_log_path
    }

    pub fn public_settings(&self) -> PublicSettings<'_> {
        PublicSettings {
            name: &self.config.app.name,
            url: &self.config.app.url,
            timezone: &self.config.app.timezone,
        }
    }

    /// Full configuration, for the HTTP host and logging bootstrap
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::{ExposeSecret, Secret};
    use types::SameSite;

    fn provider() -> ConfigProvider {
        let mut config = Config::example();
        config.app.url = "http://localhost/companion/consultants_near_me".to_string();
        config.video.app_id = Secret::new("f713b3dd3d814d968da39ac2748b8eea".to_string());
        ConfigProvider::new(config)
    }

    #[test]
    fn test_every_setting_is_defined() {
        let provider = provider();
        for key in SettingKey::ALL {
            assert!(!provider.get(key).is_empty(), "{} is empty", key);
        }
    }

    #[test]
    fn test_setting_types() {
        let provider = provider();
        assert!(matches!(provider.get(SettingKey::AppName), SettingValue::Text("CompanionX")));
        assert!(matches!(provider.get(SettingKey::AppUrl), SettingValue::Url(_)));
        assert!(matches!(provider.get(SettingKey::AppTimezone), SettingValue::Timezone("UTC")));
        assert_eq!(provider.get(SettingKey::SessionCookieSecure).as_flag(), Some(false));
        assert_eq!(provider.get(SettingKey::SessionCookieHttpOnly).as_flag(), Some(true));
        assert!(matches!(
            provider.get(SettingKey::SessionCookieSameSite),
            SettingValue::SameSite(SameSite::Lax)
        ));
        assert!(matches!(provider.get(SettingKey::ErrorLogPath), SettingValue::Path(_)));

        for key in SettingKey::ALL {
            assert_eq!(
                key.is_sensitive(),
                matches!(provider.get(key), SettingValue::Secret(_))
            );
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let provider = provider();
        let value = provider.lookup("APP_TIMEZONE").unwrap();
        assert_eq!(value.as_str(), Some("UTC"));

        match provider.lookup("AGORA_APP_ID").unwrap() {
            SettingValue::Secret(id) => {
                assert_eq!(id.expose_secret(), "f713b3dd3d814d968da39ac2748b8eea")
            }
            other => panic!("unexpected value {:?}", other),
        }

        let err = provider.lookup("DATABASE_PASSWORD").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownSetting {
                key: "DATABASE_PASSWORD".to_string()
            }
        );
    }

    #[test]
    fn test_public_settings_exclude_secrets() {
        let provider = provider();
        let json = serde_json::to_string(&provider.public_settings()).unwrap();
        assert!(json.contains("CompanionX"));
        assert!(!json.contains("f713b3dd"));
        assert!(!json.contains("ops@companionx"));

        assert!(!format!("{:?}", provider).contains("f713b3dd"));
    }
}
