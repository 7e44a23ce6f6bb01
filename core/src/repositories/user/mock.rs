//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// Mock user repository keyed by uid
#[derive(Default)]
pub struct MockUserRepository {
    users: RwLock<HashMap<String, User>>,
    should_fail: AtomicBool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.users.write().await.insert(user.uid.clone(), user);
    }

    pub async fn get(&self, uid: &str) -> Option<User> {
        self.users.read().await.get(uid).cloned()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock user repository failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email_or_phone_number(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == identifier || u.phone_number == identifier)
            .cloned())
    }

    async fn update_blocked_until(
        &self,
        uid: &str,
        blocked_until: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        self.check()?;
        match self.users.write().await.get_mut(uid) {
            Some(user) => {
                user.blocked_until = blocked_until;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("user {}", uid),
            }),
        }
    }
}
