//! Token cleanup service for periodic maintenance of the token store
//!
//! Removes refresh tokens that no longer verify together with their access
//! tokens, and access tokens left without a refresh token.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::entities::token::TokenSubject;
use crate::errors::DomainError;
use crate::repositories::TokenRepository;
use crate::services::signing::SigningBackend;

use super::service::TokenService;

/// Configuration for token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Service removing invalid tokens from the store
pub struct TokenCleanupService<R: TokenRepository + 'static, S: SigningBackend + 'static> {
    tokens: Arc<TokenService<R, S>>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository + 'static, S: SigningBackend + 'static> TokenCleanupService<R, S> {
    pub fn new(tokens: Arc<TokenService<R, S>>, config: TokenCleanupConfig) -> Self {
        Self { tokens, config }
    }

    /// Run a single cleanup cycle
    ///
    /// This method performs the following cleanup tasks:
    /// 1. Delete refresh tokens that fail verification, with their access
    ///    token when it fails verification too or does not exist
    /// 2. Delete access tokens whose refresh token is gone
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of cleanup operations
    /// * `Err(DomainError)` - If the token store cannot be listed
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        info!("Starting token cleanup cycle");

        let mut result = CleanupResult::default();

        match self.cleanup_invalid_refresh_tokens(&mut result).await {
            Ok(()) => info!(
                refresh_deleted = result.refresh_tokens_deleted,
                access_deleted = result.access_tokens_deleted,
                "Deleted invalid token pairs"
            ),
            Err(e) => {
                error!(error = %e, "Failed to list refresh tokens");
                return Err(e);
            }
        }

        match self.cleanup_orphaned_access_tokens().await {
            Ok(count) => {
                result.orphaned_tokens_deleted = count;
                info!(count, "Deleted orphaned access tokens");
            }
            Err(e) => {
                error!(error = %e, "Failed to cleanup orphaned tokens");
                result
                    .errors
                    .push(format!("Orphaned token cleanup error: {}", e));
            }
        }

        info!(
            total = result.total_cleaned(),
            errors = result.errors.len(),
            "Token cleanup completed"
        );

        Ok(result)
    }

    async fn cleanup_invalid_refresh_tokens(
        &self,
        result: &mut CleanupResult,
    ) -> Result<(), DomainError> {
        let repository = self.tokens.repository();
        let refresh_tokens = repository.find_by_subject(TokenSubject::Refresh).await?;

        for refresh in refresh_tokens {
            if self.tokens.verify_token(&refresh.signed_string).await.is_ok() {
                continue;
            }

            let access = match repository
                .find_access_token_by_refresh_token_id(refresh.id)
                .await
            {
                Ok(access) => access,
                Err(e) => {
                    result
                        .errors
                        .push(format!("Access lookup for refresh token {}: {}", refresh.id, e));
                    continue;
                }
            };

            match access {
                None => {
                    debug!(token_id = %refresh.id, "Deleting invalid refresh token without access token");
                    match repository.delete(&refresh).await {
                        Ok(()) => result.refresh_tokens_deleted += 1,
                        Err(e) => result
                            .errors
                            .push(format!("Delete refresh token {}: {}", refresh.id, e)),
                    }
                }
                Some(access) => {
                    if self.tokens.verify_token(&access.signed_string).await.is_ok() {
                        continue;
                    }

                    debug!(
                        refresh_token_id = %refresh.id,
                        access_token_id = %access.id,
                        "Deleting invalid token pair"
                    );
                    match repository.delete(&access).await {
                        Ok(()) => result.access_tokens_deleted += 1,
                        Err(e) => {
                            result
                                .errors
                                .push(format!("Delete access token {}: {}", access.id, e));
                            continue;
                        }
                    }
                    match repository.delete(&refresh).await {
                        Ok(()) => result.refresh_tokens_deleted += 1,
                        Err(e) => result
                            .errors
                            .push(format!("Delete refresh token {}: {}", refresh.id, e)),
                    }
                }
            }
        }

        Ok(())
    }

    async fn cleanup_orphaned_access_tokens(&self) -> Result<usize, DomainError> {
        let repository = self.tokens.repository();
        let mut deleted = 0;

        for access in repository.find_by_subject(TokenSubject::Access).await? {
            let paired = match access.refresh_token_id {
                Some(refresh_id) => repository.find_by_id(refresh_id).await?,
                None => None,
            };
            if paired.is_none() {
                match repository.delete(&access).await {
                    Ok(()) => deleted += 1,
                    Err(e) if e.is_token_not_found() => {}
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(deleted)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = interval.as_secs(),
                "Token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!(errors = ?result.errors, "Cleanup completed with errors");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Token cleanup cycle failed");
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of invalid refresh tokens deleted
    pub refresh_tokens_deleted: usize,
    /// Number of access tokens deleted along with their refresh token
    pub access_tokens_deleted: usize,
    /// Number of access tokens deleted because their refresh token was gone
    pub orphaned_tokens_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get total number of tokens cleaned up
    pub fn total_cleaned(&self) -> usize {
        self.refresh_tokens_deleted + self.access_tokens_deleted + self.orphaned_tokens_deleted
    }
}
