//! # Wallet Users Core
//!
//! Core business logic and domain layer for the wallet users backend.
//! This crate contains the token lifecycle and login security services,
//! domain entities, repository interfaces, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::*;
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{
    BlockedIpRepository, FailAttemptRepository, TokenRepository, UserRepository,
};
pub use services::{
    AutologoutTtlResolver, Blocker, BlockerConfig, CleanupResult, FixedTtlResolver, HmacSigner,
    KeyPairSigner, NotificationDispatcher, ParsedToken, SettingsProvider, Signer, SigningBackend,
    TemporaryTokens, TokenCleanupConfig, TokenCleanupService, TokenOptions, TokenService,
    TokenTtlResolver,
};
