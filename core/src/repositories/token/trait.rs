//! Token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenSubject};
use crate::errors::DomainError;

/// Repository trait for Token entity persistence operations
///
/// Every create and delete is atomic per record. Issuing or revoking a pair
/// is a sequence of single-record operations, so implementations are not
/// required to provide cross-record transactions.
///
/// Finders return the owner snapshot in `Token::user` when the store can
/// join the user record.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new token
    ///
    /// # Arguments
    /// * `token` - The token record to persist
    ///
    /// # Returns
    /// * `Ok(Token)` - The stored token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate signed string)
    async fn create(&self, token: Token) -> Result<Token, DomainError>;

    /// Delete a token record
    ///
    /// # Returns
    /// * `Ok(())` - The record was deleted by this call
    /// * `Err(DomainError::Token(TokenError::TokenNotFound))` - No record was deleted
    /// * `Err(DomainError)` - Storage error occurred
    async fn delete(&self, token: &Token) -> Result<(), DomainError>;

    /// Delete a token record by identifier, with the same results as `delete`
    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete every token owned by a user
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of deleted tokens
    async fn delete_tokens_by_uid(&self, uid: &str) -> Result<u64, DomainError>;

    /// Find a token by its identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError>;

    /// Find a token by its signed string
    ///
    /// # Returns
    /// * `Ok(Some(Token))` - Token found
    /// * `Ok(None)` - No token with the given signed string
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_signed_string(&self, signed_string: &str)
        -> Result<Option<Token>, DomainError>;

    /// Find a token by its signed string, restricted to one subject
    async fn find_by_signed_string_and_subject(
        &self,
        signed_string: &str,
        subject: TokenSubject,
    ) -> Result<Option<Token>, DomainError>;

    /// List every token with the given subject
    async fn find_by_subject(&self, subject: TokenSubject) -> Result<Vec<Token>, DomainError>;

    /// Find the access token paired with a refresh token
    async fn find_access_token_by_refresh_token_id(
        &self,
        refresh_token_id: Uuid,
    ) -> Result<Option<Token>, DomainError>;
}
