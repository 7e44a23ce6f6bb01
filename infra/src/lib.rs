//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the wallet users
//! backend. It provides concrete implementations for the store and
//! collaborator contracts defined in `wu_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Memory**: Thread-safe in-memory stores
//! - **Database**: MySQL stores using SQLx
//! - **Clients**: HTTP clients for the settings and notification services
//! - **Config / Logging**: Layered configuration loading and tracing setup
//! - **Bootstrap**: Assembly of the token and login security services
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Service assembly from configuration
pub mod bootstrap;

/// HTTP clients for external services
pub mod clients;

/// Layered configuration loading
pub mod config;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Tracing subscriber setup
pub mod logging;

/// In-memory store implementations
pub mod memory;

pub use bootstrap::AuthServices;
pub use clients::{HttpNotificationDispatcher, HttpSettingsProvider};
pub use config::load_config;
pub use logging::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] wu_shared::ConfigError),

    /// Tracing subscriber setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// Domain error raised while assembling services
    #[error(transparent)]
    Domain(#[from] wu_core::DomainError),
}
