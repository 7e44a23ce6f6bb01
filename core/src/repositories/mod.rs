pub mod blocked_ip;
pub mod fail_attempt;
pub mod token;
pub mod user;

pub use blocked_ip::BlockedIpRepository;
pub use fail_attempt::FailAttemptRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use blocked_ip::MockBlockedIpRepository;
#[cfg(test)]
pub use fail_attempt::MockFailAttemptRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
