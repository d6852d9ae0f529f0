//! Configuration management for CompanionX
//!
//! This crate handles parsing, validation, and read-only access to the
//! application settings loaded from YAML files and environment variables.

pub mod loader;
pub mod provider;
pub mod schema;
pub mod validation;

pub use loader::ConfigLoader;
pub use provider::{ConfigProvider, PublicSettings};
pub use schema::*;
pub use validation::*;
