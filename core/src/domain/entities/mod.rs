//! Domain entities representing core business objects.

pub mod login_security;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use login_security::{AutologoutSettings, BlockedIp, FailAttempt, LoginSecuritySettings};
pub use token::{
    TemporaryClaims, Token, TokenClaims, TokenPair, TokenSubject, TEMPORARY_TOKEN_EXPIRY_HOURS,
    TEMPORARY_TOKEN_SUBJECT,
};
pub use user::{User, UserStatus};
