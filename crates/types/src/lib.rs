//! Shared types for the CompanionX system
//!
//! This crate contains the setting keys, typed setting values and error
//! types shared by the configuration provider and the HTTP host.

pub mod error;
pub mod setting;
pub mod utils;

// Re-export commonly used types
pub use error::{CompanionError, ConfigError, Result};
pub use setting::{SameSite, SessionCookiePolicy, SettingKey, SettingValue, REDACTED};
