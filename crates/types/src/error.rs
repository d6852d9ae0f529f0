//! Error types for the CompanionX system

use thiserror::Error;

/// Main error type for the CompanionX system
#[derive(Error, Debug)]
pub enum CompanionError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A client tried to fetch a protected resource directly
    #[error("Direct access forbidden: {resource}")]
    Forbidden { resource: String },
}

/// Result type alias for CompanionX operations
pub type Result<T> = std::result::Result<T, CompanionError>;

/// Configuration specific errors
///
/// Variants that carry a value are never built for sensitive settings;
/// those report the field name only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    /// Invalid value
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Lookup of a setting outside the known set
    #[error("Unknown setting: {key}")]
    UnknownSetting { key: String },
}

impl From<ConfigError> for CompanionError {
    fn from(err: ConfigError) -> Self {
        CompanionError::Config(err.to_string())
    }
}
