//! Assembly of the token lifecycle and login security services
//!
//! Builds the signer and the token lifetime policy from `AppConfig`, wires
//! the services to the given stores and collaborators, and loads the initial
//! login security policy.

use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use wu_core::repositories::{
    BlockedIpRepository, FailAttemptRepository, TokenRepository, UserRepository,
};
use wu_core::services::{
    AutologoutTtlResolver, Blocker, BlockerConfig, FixedTtlResolver, NotificationDispatcher,
    SettingsProvider, Signer, TemporaryTokens, TokenCleanupConfig, TokenCleanupService,
    TokenService, TokenTtlResolver,
};
use wu_shared::config::{AppConfig, TokenTtlConfig, TtlPolicy};
use wu_shared::ConfigError;

use crate::clients::{HttpNotificationDispatcher, HttpSettingsProvider};
use crate::InfrastructureError;

/// Store implementations the services persist to
pub struct AuthStores<T, U, F, B> {
    pub tokens: Arc<T>,
    pub users: Arc<U>,
    pub fail_attempts: Arc<F>,
    pub blocked_ips: Arc<B>,
}

/// Fully wired services
pub struct AuthServices<T, U, F, B, P, N>
where
    T: TokenRepository + 'static,
    U: UserRepository,
    F: FailAttemptRepository,
    B: BlockedIpRepository,
    P: SettingsProvider,
    N: NotificationDispatcher,
{
    pub signer: Arc<Signer>,
    pub tokens: Arc<TokenService<T, Signer>>,
    pub temporary_tokens: Arc<TemporaryTokens<Signer>>,
    pub blocker: Arc<Blocker<U, F, B, P, N>>,
    pub cleanup: Arc<TokenCleanupService<T, Signer>>,
}

/// Services talking to the settings and notification services over HTTP
pub type HttpAuthServices<T, U, F, B> =
    AuthServices<T, U, F, B, HttpSettingsProvider, HttpNotificationDispatcher>;

impl<T, U, F, B, P, N> AuthServices<T, U, F, B, P, N>
where
    T: TokenRepository + 'static,
    U: UserRepository,
    F: FailAttemptRepository,
    B: BlockedIpRepository,
    P: SettingsProvider + 'static,
    N: NotificationDispatcher,
{
    /// Wire the services
    ///
    /// # Arguments
    /// * `config` - Application configuration
    /// * `stores` - Store implementations
    /// * `settings` - Source of the login security and autologout policies
    /// * `notifications` - Dispatcher of blocked-account notifications
    ///
    /// # Returns
    /// * `Err(InfrastructureError)` - Invalid signing configuration or key
    ///   material, or invalid token lifetimes
    pub async fn build(
        config: &AppConfig,
        stores: AuthStores<T, U, F, B>,
        settings: Arc<P>,
        notifications: Arc<N>,
    ) -> Result<Self, InfrastructureError> {
        let signer = Arc::new(Signer::from_config(&config.jwt)?);
        let ttl_resolver = ttl_resolver(&config.token_ttl, Arc::clone(&settings))?;

        let tokens = Arc::new(TokenService::new(
            stores.tokens,
            Arc::clone(&signer),
            ttl_resolver,
        ));
        let temporary_tokens = Arc::new(TemporaryTokens::new(Arc::clone(&signer)));
        let cleanup = Arc::new(TokenCleanupService::new(
            Arc::clone(&tokens),
            TokenCleanupConfig::default(),
        ));

        let blocker = Arc::new(Blocker::new(
            stores.users,
            stores.fail_attempts,
            stores.blocked_ips,
            settings,
            notifications,
            BlockerConfig::from(&config.login_security),
        ));
        blocker.load_settings().await;

        info!(
            environment = %config.environment,
            signing_method = %config.jwt.signing_method,
            ttl_policy = ?config.token_ttl.policy,
            "Auth services initialized"
        );

        Ok(Self {
            signer,
            tokens,
            temporary_tokens,
            blocker,
            cleanup,
        })
    }
}

impl<T, U, F, B> HttpAuthServices<T, U, F, B>
where
    T: TokenRepository + 'static,
    U: UserRepository,
    F: FailAttemptRepository,
    B: BlockedIpRepository,
{
    /// Wire the services to the HTTP settings and notification clients
    /// configured in `config.services`
    pub async fn build_with_http_clients(
        config: &AppConfig,
        stores: AuthStores<T, U, F, B>,
    ) -> Result<Self, InfrastructureError> {
        let settings = Arc::new(HttpSettingsProvider::from_config(&config.services)?);
        let notifications = Arc::new(HttpNotificationDispatcher::from_config(&config.services)?);
        Self::build(config, stores, settings, notifications).await
    }
}

/// Token lifetime policy selected by the configuration
pub fn ttl_resolver<P>(
    config: &TokenTtlConfig,
    settings: Arc<P>,
) -> Result<Arc<dyn TokenTtlResolver>, InfrastructureError>
where
    P: SettingsProvider + 'static,
{
    let resolver: Arc<dyn TokenTtlResolver> = match config.policy {
        TtlPolicy::Adaptive => Arc::new(AutologoutTtlResolver::new(settings)),
        TtlPolicy::Fixed => Arc::new(FixedTtlResolver::new(
            seconds("token_ttl.refresh_ttl_seconds", config.refresh_ttl_seconds)?,
            seconds("token_ttl.access_ttl_seconds", config.access_ttl_seconds)?,
        )),
    };
    Ok(resolver)
}

fn seconds(field: &str, value: u64) -> Result<Duration, ConfigError> {
    i64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("{} is not a usable number of seconds", value),
        })
}
