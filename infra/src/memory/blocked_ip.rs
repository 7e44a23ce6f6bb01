//! In-memory blocked IP store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use wu_core::domain::entities::login_security::BlockedIp;
use wu_core::errors::DomainError;
use wu_core::repositories::BlockedIpRepository;

#[derive(Default)]
pub struct MemoryBlockedIpRepository {
    records: RwLock<Vec<BlockedIp>>,
}

impl MemoryBlockedIpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prepared record, e.g. one that already expired
    pub async fn insert(&self, record: BlockedIp) {
        self.records.write().await.push(record);
    }

    pub async fn all(&self) -> Vec<BlockedIp> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl BlockedIpRepository for MemoryBlockedIpRepository {
    async fn find_by_ip(&self, ip: &str) -> Result<Option<BlockedIp>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.ip == ip)
            .cloned())
    }

    async fn create(
        &self,
        ip: &str,
        blocked_until: DateTime<Utc>,
    ) -> Result<BlockedIp, DomainError> {
        let record = BlockedIp::new(ip, blocked_until);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, blocked_ip: &BlockedIp) -> Result<(), DomainError> {
        self.records.write().await.retain(|r| r.id != blocked_ip.id);
        Ok(())
    }
}
