//! Thread-safe in-memory stores
//!
//! Used by tests and single-process deployments. The token store resolves
//! token owners through the user store it was created with.

mod blocked_ip;
mod fail_attempt;
mod token;
mod user;

pub use blocked_ip::MemoryBlockedIpRepository;
pub use fail_attempt::MemoryFailAttemptRepository;
pub use token::MemoryTokenRepository;
pub use user::MemoryUserRepository;
