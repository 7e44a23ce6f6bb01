//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing, token lifetimes and login security
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `services` - Settings and notification service endpoints

pub mod auth;
pub mod database;
pub mod environment;
pub mod services;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{JwtConfig, LoginSecurityConfig, SigningMethod, TokenTtlConfig, TtlPolicy};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use services::ServicesConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// JWT signing configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Token lifetime policy
    #[serde(default)]
    pub token_ttl: TokenTtlConfig,

    /// Login blocker deadlines
    #[serde(default)]
    pub login_security: LoginSecurityConfig,

    /// External service endpoints
    #[serde(default)]
    pub services: ServicesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Baseline configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }

    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/wallet_users_dev"),
            jwt: JwtConfig::default(),
            token_ttl: TokenTtlConfig::default(),
            login_security: LoginSecurityConfig::default(),
            services: ServicesConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::default().with_max_connections(50),
            jwt: JwtConfig::default(),
            token_ttl: TokenTtlConfig::default(),
            login_security: LoginSecurityConfig::default(),
            services: ServicesConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }
}
