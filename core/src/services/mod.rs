//! Business services containing domain logic and use cases.

pub mod auth;
pub mod notification;
pub mod settings;
pub mod signing;
pub mod token;

// Re-export commonly used types
pub use auth::{Blocker, BlockerConfig};
pub use notification::NotificationDispatcher;
pub use settings::SettingsProvider;
pub use signing::{HmacSigner, KeyPairSigner, ParsedToken, Signer, SigningBackend};
pub use token::{
    AutologoutTtlResolver, CleanupResult, FixedTtlResolver, TemporaryTokens, TokenCleanupConfig,
    TokenCleanupService, TokenOptions, TokenService, TokenTtlResolver,
};
