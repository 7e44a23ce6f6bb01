//! In-memory failed login attempt store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use wu_core::domain::entities::login_security::FailAttempt;
use wu_core::errors::DomainError;
use wu_core::repositories::FailAttemptRepository;

#[derive(Default)]
pub struct MemoryFailAttemptRepository {
    attempts: RwLock<Vec<FailAttempt>>,
}

impl MemoryFailAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored attempt
    pub async fn all(&self) -> Vec<FailAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl FailAttemptRepository for MemoryFailAttemptRepository {
    async fn create(&self, ip: Option<&str>, uid: Option<&str>) -> Result<(), DomainError> {
        let attempt = FailAttempt::new(ip.map(str::to_string), uid.map(str::to_string));
        self.attempts.write().await.push(attempt);
        Ok(())
    }

    async fn count_by_ip(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, DomainError> {
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.ip.as_deref() == Some(ip) && a.created_at >= since)
            .count() as u64)
    }

    async fn count_by_uid(&self, uid: &str, since: DateTime<Utc>) -> Result<u64, DomainError> {
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.uid.as_deref() == Some(uid) && !a.impersonated && a.created_at >= since)
            .count() as u64)
    }

    async fn delete_all_by_ip(&self, ip: &str) -> Result<(), DomainError> {
        self.attempts
            .write()
            .await
            .retain(|a| a.ip.as_deref() != Some(ip));
        Ok(())
    }

    async fn delete_all_old(&self, uid: &str, before: DateTime<Utc>) -> Result<(), DomainError> {
        self.attempts
            .write()
            .await
            .retain(|a| a.uid.as_deref() != Some(uid) && a.created_at > before);
        Ok(())
    }

    async fn impersonate_all_by_uid(&self, uid: &str) -> Result<(), DomainError> {
        self.attempts
            .write()
            .await
            .iter_mut()
            .filter(|a| a.uid.as_deref() == Some(uid))
            .for_each(|a| a.impersonated = true);
        Ok(())
    }
}
