//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access/refresh pair issuance, verification and rotation
//! - Token revocation and cleanup of invalid records
//! - Token lifetime policies
//! - Temporary `limited_auth` tokens

mod cleanup;
mod config;
mod service;
mod temporary;
mod ttl;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenOptions;
pub use service::TokenService;
pub use temporary::TemporaryTokens;
pub use ttl::{
    AutologoutTtlResolver, FixedTtlResolver, TokenTtlResolver, DEFAULT_ACCESS_TTL_MINUTES,
    DEFAULT_REFRESH_TTL_HOURS, MIN_AUTOLOGOUT_TIMEOUT_MINUTES, RESERVE_PADDING_SECONDS,
};
