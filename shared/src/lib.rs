//! Shared configuration types for the wallet users backend
//!
//! This crate provides the configuration consumed by the core and
//! infrastructure crates:
//! - Environment detection and logging configuration
//! - JWT signing and token lifetime configuration
//! - Login security and external service configuration
//! - Database configuration

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    LoginSecurityConfig, ServicesConfig, SigningMethod, TokenTtlConfig, TtlPolicy,
};
pub use errors::ConfigError;
