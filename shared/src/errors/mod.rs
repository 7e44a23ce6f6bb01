//! Configuration errors

use thiserror::Error;

/// Errors raised while validating configuration values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported signing method: {0}")]
    UnsupportedSigningMethod(String),

    #[error("Signing method {method} requires a secret")]
    MissingSecret { method: String },

    #[error("Signing method {method} requires {field}")]
    MissingKeyPath { method: String, field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
