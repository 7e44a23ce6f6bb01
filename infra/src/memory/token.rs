//! In-memory token store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use wu_core::domain::entities::token::{Token, TokenSubject};
use wu_core::errors::{DomainError, TokenError};
use wu_core::repositories::TokenRepository;

use super::user::MemoryUserRepository;

/// Token store attaching owner snapshots from a user store
pub struct MemoryTokenRepository {
    tokens: RwLock<HashMap<Uuid, Token>>,
    users: Arc<MemoryUserRepository>,
}

impl MemoryTokenRepository {
    pub fn new(users: Arc<MemoryUserRepository>) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            users,
        }
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    async fn with_owner(&self, token: Option<Token>) -> Option<Token> {
        let token = token?;
        Some(match self.users.find_by_uid(&token.user_uid).await {
            Some(user) => token.with_user(user),
            None => token,
        })
    }

    async fn find_first<F>(&self, predicate: F) -> Option<Token>
    where
        F: Fn(&Token) -> bool,
    {
        let found = self
            .tokens
            .read()
            .await
            .values()
            .find(|t| predicate(t))
            .cloned();
        self.with_owner(found).await
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn create(&self, mut token: Token) -> Result<Token, DomainError> {
        let mut tokens = self.tokens.write().await;
        if tokens
            .values()
            .any(|t| t.id == token.id || t.signed_string == token.signed_string)
        {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        token.user = None;
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn delete(&self, token: &Token) -> Result<(), DomainError> {
        self.delete_by_id(token.id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        match self.tokens.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(TokenError::TokenNotFound.into()),
        }
    }

    async fn delete_tokens_by_uid(&self, uid: &str) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_uid != uid);
        Ok((before - tokens.len()) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError> {
        let found = self.tokens.read().await.get(&id).cloned();
        Ok(self.with_owner(found).await)
    }

    async fn find_by_signed_string(
        &self,
        signed_string: &str,
    ) -> Result<Option<Token>, DomainError> {
        Ok(self.find_first(|t| t.signed_string == signed_string).await)
    }

    async fn find_by_signed_string_and_subject(
        &self,
        signed_string: &str,
        subject: TokenSubject,
    ) -> Result<Option<Token>, DomainError> {
        Ok(self
            .find_first(|t| t.signed_string == signed_string && t.subject == subject)
            .await)
    }

    async fn find_by_subject(&self, subject: TokenSubject) -> Result<Vec<Token>, DomainError> {
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
        Ok(self
            .find_first(|t| t.is_access() && t.refresh_token_id == Some(refresh_token_id))
            .await)
    }
}
