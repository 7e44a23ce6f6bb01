//! Blocked IP repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::login_security::BlockedIp;
use crate::errors::DomainError;

/// Repository trait for blocked IP records
#[async_trait]
pub trait BlockedIpRepository: Send + Sync {
    /// Find the block record for an IP
    ///
    /// # Returns
    /// * `Ok(Some(BlockedIp))` - The IP has a block record, expired or not
    /// * `Ok(None)` - The IP was never blocked or the record was removed
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_ip(&self, ip: &str) -> Result<Option<BlockedIp>, DomainError>;

    /// Block an IP until the given time
    async fn create(&self, ip: &str, blocked_until: DateTime<Utc>)
        -> Result<BlockedIp, DomainError>;

    /// Remove a block record
    async fn delete(&self, blocked_ip: &BlockedIp) -> Result<(), DomainError>;
}
