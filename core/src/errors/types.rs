//! Error types for login security and token management
//!
//! Messages are plain English; user-facing wording is left to the
//! transport layer.

use thiserror::Error;

/// Login security errors
///
/// Raised by the login blocker pre-screening checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User IP is blocked: {ip}")]
    IpBlocked { ip: String },

    #[error("User account is blocked: {username}")]
    UserBlocked { username: String },

    #[error("Phone number {phone_number} of user {username} is not confirmed")]
    PhoneNotConfirmed {
        username: String,
        phone_number: String,
    },
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token signing method does not match")]
    AlgorithmMismatch,

    #[error("Token subject mismatch: expected {expected}, got {actual}")]
    InvalidSubject { expected: String, actual: String },

    #[error("Token not found")]
    TokenNotFound,

    #[error("Tokens pair does not match")]
    PairMismatch,

    #[error("Refresh token of the access token no longer exists")]
    OrphanedToken,

    #[error("Token generation failed: {message}")]
    TokenGenerationFailed { message: String },

    #[error("Failed to load signing key: {message}")]
    KeyLoadError { message: String },
}
