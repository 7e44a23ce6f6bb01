//! Fail attempt repository trait for windowed login failure counting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Repository trait for failed login attempts
#[async_trait]
pub trait FailAttemptRepository: Send + Sync {
    /// Record a failed attempt tagged with an IP, a user id, or both
    async fn create(&self, ip: Option<&str>, uid: Option<&str>) -> Result<(), DomainError>;

    /// Count attempts from an IP created at or after `since`
    ///
    /// Impersonated attempts are counted.
    async fn count_by_ip(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Count attempts for a user created at or after `since`
    ///
    /// Impersonated attempts are not counted.
    async fn count_by_uid(&self, uid: &str, since: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Delete every attempt from an IP
    async fn delete_all_by_ip(&self, ip: &str) -> Result<(), DomainError>;

    /// Delete every attempt of a user plus every attempt created before `before`
    async fn delete_all_old(&self, uid: &str, before: DateTime<Utc>) -> Result<(), DomainError>;

    /// Mark every attempt of a user as impersonated
    async fn impersonate_all_by_uid(&self, uid: &str) -> Result<(), DomainError>;
}
