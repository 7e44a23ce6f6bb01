//! Main token service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::{Token, TokenClaims, TokenPair, TokenSubject};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;
use crate::services::signing::{ParsedToken, SigningBackend};

use super::config::TokenOptions;
use super::ttl::TokenTtlResolver;

/// Service issuing, verifying, rotating and revoking access/refresh pairs
pub struct TokenService<R: TokenRepository, S: SigningBackend> {
    repository: Arc<R>,
    signer: Arc<S>,
    ttl_resolver: Arc<dyn TokenTtlResolver>,
}

impl<R: TokenRepository, S: SigningBackend> TokenService<R, S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `signer` - Signing backend chosen at startup
    /// * `ttl_resolver` - Default token lifetime policy
    pub fn new(
        repository: Arc<R>,
        signer: Arc<S>,
        ttl_resolver: Arc<dyn TokenTtlResolver>,
    ) -> Self {
        Self {
            repository,
            signer,
            ttl_resolver,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Issues a refresh token, then an access token paired with it
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Signed strings of both tokens
    /// * `Err(DomainError)` - TTL resolution, signing or persistence failed
    pub async fn issue_tokens(&self, user: &User, options: &TokenOptions) -> DomainResult<TokenPair> {
        let refresh = self.issue_refresh_token(user, options).await?;
        let access = self.issue_access_token(user, &refresh, options).await?;

        info!(uid = %user.uid, "Issued token pair");
        Ok(TokenPair::new(access.signed_string, refresh.signed_string))
    }

    /// Issues and persists a refresh token
    pub async fn issue_refresh_token(&self, user: &User, options: &TokenOptions) -> DomainResult<Token> {
        let record = Token::new_refresh(&user.uid, String::new());
        self.issue(user, record, options).await
    }

    /// Issues and persists an access token referencing `refresh_token`
    pub async fn issue_access_token(
        &self,
        user: &User,
        refresh_token: &Token,
        options: &TokenOptions,
    ) -> DomainResult<Token> {
        let record = Token::new_access(&user.uid, String::new(), refresh_token.id);
        self.issue(user, record, options).await
    }

    async fn issue(&self, user: &User, mut record: Token, options: &TokenOptions) -> DomainResult<Token> {
        let resolver = options.ttl_resolver.as_ref().unwrap_or(&self.ttl_resolver);
        let ttl = resolver.resolve_by_token_subject(record.subject.as_str()).await?;

        let claims = TokenClaims::for_user(record.id, record.subject, user, Utc::now() + ttl);
        let unsigned = self.signer.issue(claims);
        record.signed_string = self.signer.sign(&unsigned, None)?;

        self.repository.create(record).await
    }

    /// Verifies a persisted access or refresh token
    ///
    /// The token must exist in the store, carry a valid signature, be
    /// unexpired and have the subject it was stored with. An access token
    /// whose refresh token no longer exists is rejected.
    pub async fn verify_token(&self, signed_string: &str) -> DomainResult<ParsedToken<TokenClaims>> {
        let record = self
            .repository
            .find_by_signed_string(signed_string)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        let parsed = self.signer.parse::<TokenClaims>(signed_string, None)?;

        if parsed.claims.sub != record.subject.as_str() {
            warn!(
                token_id = %record.id,
                expected = record.subject.as_str(),
                actual = %parsed.claims.sub,
                "Token subject does not match the stored subject"
            );
            return Err(TokenError::InvalidSubject {
                expected: record.subject.as_str().to_string(),
                actual: parsed.claims.sub,
            }
            .into());
        }

        if record.is_access() {
            let paired = match record.refresh_token_id {
                Some(refresh_id) => self.repository.find_by_id(refresh_id).await?,
                None => None,
            };
            if paired.is_none() {
                warn!(token_id = %record.id, "Access token has no refresh token");
                return Err(TokenError::OrphanedToken.into());
            }
        }

        Ok(parsed)
    }

    /// Rotates a token pair
    ///
    /// When the access token cannot be found the refresh token is revoked
    /// before the lookup error is returned. A pair whose access token does
    /// not reference the refresh token is rejected without rotating.
    /// Concurrent rotations of one pair yield a single new pair; the others
    /// fail with `TokenNotFound`.
    pub async fn refresh_tokens(
        &self,
        access_signed: &str,
        refresh_signed: &str,
        options: &TokenOptions,
    ) -> DomainResult<TokenPair> {
        let refresh = self
            .repository
            .find_by_signed_string_and_subject(refresh_signed, TokenSubject::Refresh)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        self.verify_token(refresh_signed).await?;

        let access = match self
            .repository
            .find_by_signed_string_and_subject(access_signed, TokenSubject::Access)
            .await
        {
            Ok(Some(access)) => access,
            Ok(None) => {
                self.revoke_unpaired_refresh(refresh_signed).await;
                return Err(TokenError::TokenNotFound.into());
            }
            Err(e) => {
                self.revoke_unpaired_refresh(refresh_signed).await;
                return Err(e);
            }
        };

        if access.refresh_token_id != Some(refresh.id) {
            warn!(
                access_token_id = %access.id,
                refresh_token_id = %refresh.id,
                "Refresh attempted with tokens from different pairs"
            );
            return Err(TokenError::PairMismatch.into());
        }

        let user = refresh.user.clone().ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", refresh.user_uid),
        })?;

        // Only the caller that deletes the access record may rotate the pair
        if let Err(e) = self.revoke_token(access_signed).await {
            warn!(uid = %user.uid, error = %e, "Failed to revoke rotated access token");
            return Err(e);
        }

        // Revoking the access token also deletes its refresh token
        match self.revoke_token(refresh_signed).await {
            Ok(()) => {}
            Err(e) if e.is_token_not_found() => {}
            Err(e) => {
                error!(uid = %user.uid, error = %e, "Failed to revoke rotated refresh token");
                return Err(e);
            }
        }

        debug!(uid = %user.uid, "Revoked rotated token pair");
        self.issue_tokens(&user, options).await
    }

    async fn revoke_unpaired_refresh(&self, refresh_signed: &str) {
        if let Err(e) = self.revoke_token(refresh_signed).await {
            error!(error = %e, "Failed to revoke refresh token without access token");
        }
    }

    /// Revokes a token
    ///
    /// Revoking an access token also deletes the refresh token it references.
    /// Revoking a refresh token leaves its access token in place. Fails with
    /// `TokenNotFound` when the token record was already deleted.
    pub async fn revoke_token(&self, signed_string: &str) -> DomainResult<()> {
        let token = self
            .repository
            .find_by_signed_string(signed_string)
            .await?
            .ok_or(DomainError::Token(TokenError::TokenNotFound))?;

        if let Some(refresh_id) = token.refresh_token_id {
            match self.repository.delete_by_id(refresh_id).await {
                Ok(()) => {}
                Err(e) if e.is_token_not_found() => {}
                Err(e) => return Err(e),
            }
        }

        self.repository.delete(&token).await
    }

    /// Revokes every token of a user
    pub async fn revoke_user_tokens(&self, user: &User) -> DomainResult<u64> {
        let deleted = self.repository.delete_tokens_by_uid(&user.uid).await?;
        info!(uid = %user.uid, deleted, "Revoked all user tokens");
        Ok(deleted)
    }
}
