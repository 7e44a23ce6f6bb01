//! Mock implementation of BlockedIpRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::login_security::BlockedIp;
use crate::errors::DomainError;

use super::r#trait::BlockedIpRepository;

#[derive(Default)]
pub struct MockBlockedIpRepository {
    records: RwLock<Vec<BlockedIp>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

impl MockBlockedIpRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: BlockedIp) {
        self.records.write().await.push(record);
    }

    pub async fn all(&self) -> Vec<BlockedIp> {
        self.records.read().await.clone()
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlockedIpRepository for MockBlockedIpRepository {
    async fn find_by_ip(&self, ip: &str) -> Result<Option<BlockedIp>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.ip == ip)
            .cloned())
    }

    async fn create(
        &self,
        ip: &str,
        blocked_until: DateTime<Utc>,
    ) -> Result<BlockedIp, DomainError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock blocked IP create failure".to_string(),
            });
        }
        let record = BlockedIp::new(ip, blocked_until);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, blocked_ip: &BlockedIp) -> Result<(), DomainError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock blocked IP delete failure".to_string(),
            });
        }
        self.records.write().await.retain(|r| r.id != blocked_ip.id);
        Ok(())
    }
}
