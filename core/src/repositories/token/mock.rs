//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenSubject};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// Mock token repository for testing
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, Token>>>,
    users: Arc<RwLock<HashMap<String, User>>>,
    should_fail: AtomicBool,
    fail_deletes: AtomicBool,
    failing_subject_lookup: RwLock<Option<TokenSubject>>,
    yield_between_calls: AtomicBool,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            failing_subject_lookup: RwLock::new(None),
            yield_between_calls: AtomicBool::new(false),
        }
    }

    /// Register a user whose snapshot is attached to found tokens
    pub async fn add_user(&self, user: User) {
        self.users.write().await.insert(user.uid.clone(), user);
    }

    /// Make every subsequent call fail with a storage error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Make deletes fail with a storage error
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make `find_by_signed_string_and_subject` fail for one subject
    pub async fn set_failing_subject_lookup(&self, subject: Option<TokenSubject>) {
        *self.failing_subject_lookup.write().await = subject;
    }

    /// Yield to the runtime before every call so concurrent callers interleave
    pub fn set_yield_between_calls(&self, enabled: bool) {
        self.yield_between_calls.store(enabled, Ordering::SeqCst);
    }

    /// Insert a token without any checks
    pub async fn insert(&self, token: Token) {
        self.tokens.write().await.insert(token.id, token);
    }

    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn get(&self, id: Uuid) -> Option<Token> {
        self.tokens.read().await.get(&id).cloned()
    }

    async fn check(&self) -> Result<(), DomainError> {
        if self.yield_between_calls.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock token repository failure".to_string(),
            });
        }
        Ok(())
    }

    async fn hydrate(&self, token: Option<Token>) -> Option<Token> {
        let token = token?;
        let users = self.users.read().await;
        Some(match users.get(&token.user_uid) {
            Some(user) => token.with_user(user.clone()),
            None => token,
        })
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: Token) -> Result<Token, DomainError> {
        self.check().await?;
        let mut tokens = self.tokens.write().await;

        if tokens.values().any(|t| t.signed_string == token.signed_string) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn delete(&self, token: &Token) -> Result<(), DomainError> {
        self.delete_by_id(token.id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        self.check().await?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "Mock token delete failure".to_string(),
            });
        }
        match self.tokens.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(TokenError::TokenNotFound.into()),
        }
    }

    async fn delete_tokens_by_uid(&self, uid: &str) -> Result<u64, DomainError> {
        self.check().await?;
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_uid != uid);
        Ok((before - tokens.len()) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError> {
        self.check().await?;
        let found = self.tokens.read().await.get(&id).cloned();
        Ok(self.hydrate(found).await)
    }

    async fn find_by_signed_string(
        &self,
        signed_string: &str,
    ) -> Result<Option<Token>, DomainError> {
        self.check().await?;
        let found = self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.signed_string == signed_string)
            .cloned();
        Ok(self.hydrate(found).await)
    }

    async fn find_by_signed_string_and_subject(
        &self,
        signed_string: &str,
        subject: TokenSubject,
    ) -> Result<Option<Token>, DomainError> {
        self.check().await?;
        if *self.failing_subject_lookup.read().await == Some(subject) {
            return Err(DomainError::Storage {
                message: "Mock token lookup failure".to_string(),
            });
        }
        let found = self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.signed_string == signed_string && t.subject == subject)
            .cloned();
        Ok(self.hydrate(found).await)
    }

    async fn find_by_subject(&self, subject: TokenSubject) -> Result<Vec<Token>, DomainError> {
        self.check().await?;
        Ok(self
            .tokens
            .read()
            .await
            .values()
            .filter(|t| t.subject == subject)
            .cloned()
            .collect())
    }

    async fn find_access_token_by_refresh_token_id(
        &self,
        refresh_token_id: Uuid,
    ) -> Result<Option<Token>, DomainError> {
        self.check().await?;
        let found = self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.is_access() && t.refresh_token_id == Some(refresh_token_id))
            .cloned();
        Ok(self.hydrate(found).await)
    }
}
