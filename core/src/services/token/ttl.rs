//! Token lifetime policies

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tracing::debug;

use crate::domain::entities::token::TokenSubject;
use crate::errors::DomainResult;
use crate::services::settings::SettingsProvider;

/// Access token lifetime while autologout is disabled (30 minutes)
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;

/// Refresh token lifetime while autologout is disabled (720 hours)
pub const DEFAULT_REFRESH_TTL_HOURS: i64 = 720;

/// Added to every adaptive access token lifetime
pub const RESERVE_PADDING_SECONDS: i64 = 10;

/// Autologout timeouts below this are raised to it
pub const MIN_AUTOLOGOUT_TIMEOUT_MINUTES: i64 = 1;

/// Resolves the lifetime of a token from its subject
///
/// Unknown subjects resolve to a zero duration, not an error.
#[async_trait]
pub trait TokenTtlResolver: Send + Sync {
    async fn resolve_by_token_subject(&self, subject: &str) -> DomainResult<Duration>;
}

/// Lifetimes derived from the autologout policy
///
/// With autologout enabled:
/// `access = (timeout + padding) / 2 + 10s` and
/// `refresh = access + timeout + padding`.
pub struct AutologoutTtlResolver<P: SettingsProvider> {
    settings: Arc<P>,
}

impl<P: SettingsProvider> AutologoutTtlResolver<P> {
    pub fn new(settings: Arc<P>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl<P: SettingsProvider> TokenTtlResolver for AutologoutTtlResolver<P> {
    async fn resolve_by_token_subject(&self, subject: &str) -> DomainResult<Duration> {
        let policy = self.settings.get_autologout_settings().await?;

        let subject = match subject.parse::<TokenSubject>() {
            Ok(subject) => subject,
            Err(_) => return Ok(Duration::zero()),
        };

        if !policy.enabled {
            return Ok(match subject {
                TokenSubject::Access => Duration::minutes(DEFAULT_ACCESS_TTL_MINUTES),
                TokenSubject::Refresh => Duration::hours(DEFAULT_REFRESH_TTL_HOURS),
            });
        }

        let timeout = policy
            .timeout
            .max(Duration::minutes(MIN_AUTOLOGOUT_TIMEOUT_MINUTES));
        let window = timeout + policy.padding;
        let access_ttl = window / 2 + Duration::seconds(RESERVE_PADDING_SECONDS);

        let ttl = match subject {
            TokenSubject::Access => access_ttl,
            TokenSubject::Refresh => access_ttl + window,
        };
        debug!(subject = %subject, ttl_seconds = ttl.num_seconds(), "Resolved adaptive token TTL");
        Ok(ttl)
    }
}

/// Constant lifetimes
#[derive(Debug, Clone)]
pub struct FixedTtlResolver {
    refresh_ttl: Duration,
    access_ttl: Duration,
}

impl FixedTtlResolver {
    pub fn new(refresh_ttl: Duration, access_ttl: Duration) -> Self {
        Self {
            refresh_ttl,
            access_ttl,
        }
    }
}

#[async_trait]
impl TokenTtlResolver for FixedTtlResolver {
    async fn resolve_by_token_subject(&self, subject: &str) -> DomainResult<Duration> {
        Ok(match subject.parse::<TokenSubject>() {
            Ok(TokenSubject::Access) => self.access_ttl,
            Ok(TokenSubject::Refresh) => self.refresh_ttl,
            Err(_) => Duration::zero(),
        })
    }
}
