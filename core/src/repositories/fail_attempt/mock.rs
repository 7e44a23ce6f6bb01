//! Mock implementation of FailAttemptRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::login_security::FailAttempt;
use crate::errors::DomainError;

use super::r#trait::FailAttemptRepository;

#[derive(Default)]
pub struct MockFailAttemptRepository {
    attempts: RwLock<Vec<FailAttempt>>,
    should_fail: AtomicBool,
}

impl MockFailAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prepared attempt, e.g. one backdated outside the window
    pub async fn insert(&self, attempt: FailAttempt) {
        self.attempts.write().await.push(attempt);
    }

    pub async fn all(&self) -> Vec<FailAttempt> {
        self.attempts.read().await.clone()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock fail attempt repository failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FailAttemptRepository for MockFailAttemptRepository {
    async fn create(&self, ip: Option<&str>, uid: Option<&str>) -> Result<(), DomainError> {
        self.check()?;
        self.attempts
            .write()
            .await
            .push(FailAttempt::new(ip.map(str::to_string), uid.map(str::to_string)));
        Ok(())
    }

    async fn count_by_ip(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.ip.as_deref() == Some(ip) && a.created_at >= since)
            .count() as u64)
    }

    async fn count_by_uid(&self, uid: &str, since: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check()?;
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.uid.as_deref() == Some(uid) && !a.impersonated && a.created_at >= since)
            .count() as u64)
    }

    async fn delete_all_by_ip(&self, ip: &str) -> Result<(), DomainError> {
        self.check()?;
        self.attempts
            .write()
            .await
            .retain(|a| a.ip.as_deref() != Some(ip));
        Ok(())
    }

    async fn delete_all_old(&self, uid: &str, before: DateTime<Utc>) -> Result<(), DomainError> {
        self.check()?;
        self.attempts
            .write()
            .await
            .retain(|a| a.uid.as_deref() != Some(uid) && a.created_at > before);
        Ok(())
    }

    async fn impersonate_all_by_uid(&self, uid: &str) -> Result<(), DomainError> {
        self.check()?;
        for attempt in self.attempts.write().await.iter_mut() {
            if attempt.uid.as_deref() == Some(uid) {
                attempt.impersonated = true;
            }
        }
        Ok(())
    }
}
