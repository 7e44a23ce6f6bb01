//! MySQL store implementations

mod blocked_ip_repository_impl;
mod fail_attempt_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use blocked_ip_repository_impl::MySqlBlockedIpRepository;
pub use fail_attempt_repository_impl::MySqlFailAttemptRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use uuid::Uuid;
use wu_core::errors::DomainError;

/// Map a driver error to a storage error, keeping the failed operation
pub(crate) fn storage_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(operation, error = %e, "Database operation failed");
        DomainError::Storage {
            message: format!("Failed to {}: {}", operation, e),
        }
    }
}

/// Map a column decoding error
pub(crate) fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Storage {
        message: format!("Failed to read column {}: {}", column, e),
    }
}

pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| column_error(column, e))
}
