//! In-memory user store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use wu_core::domain::entities::user::User;
use wu_core::errors::DomainError;
use wu_core::repositories::UserRepository;

/// User store keyed by uid
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user
    pub async fn save(&self, user: User) {
        self.users.write().await.insert(user.uid.clone(), user);
    }

    pub async fn find_by_uid(&self, uid: &str) -> Option<User> {
        self.users.read().await.get(uid).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email_or_phone_number(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError> {
        if identifier.is_empty() {
            return Ok(None);
        }
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
