//! User repository trait used by the login blocker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for the user lookups and updates the login blocker needs
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email or phone number
    ///
    /// # Arguments
    /// * `identifier` - Email address or phone number entered at login
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user matches the identifier
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email_or_phone_number(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Set or clear the time until which the account is blocked
    async fn update_blocked_until(
        &self,
        uid: &str,
        blocked_until: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError>;
}
