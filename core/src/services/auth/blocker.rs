//! Login blocker protecting sign-in against brute force
//!
//! Failed sign-in attempts are counted per IP and per user inside sliding
//! windows. Crossing the configured thresholds blocks the IP or the account
//! until a computed time. Expired IP blocks are removed lazily on the next
//! check.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

use crate::domain::entities::login_security::{BlockedIp, LoginSecuritySettings};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{BlockedIpRepository, FailAttemptRepository, UserRepository};
use crate::services::notification::NotificationDispatcher;
use crate::services::settings::SettingsProvider;

use super::config::BlockerConfig;

/// Window for counting failed attempts from an IP (10 minutes)
pub const IP_FAIL_WINDOW_MINUTES: i64 = 10;

/// Window for counting failed attempts of a user (30 minutes)
pub const USER_FAIL_WINDOW_MINUTES: i64 = 30;

/// Login blocker
///
/// The login security policy is cached and only refreshed by
/// [`Blocker::load_settings`]; every decision reads one consistent snapshot.
pub struct Blocker<U, F, B, P, N>
where
    U: UserRepository,
    F: FailAttemptRepository,
    B: BlockedIpRepository,
    P: SettingsProvider,
    N: NotificationDispatcher,
{
    user_repo: Arc<U>,
    fail_attempt_repo: Arc<F>,
    blocked_ip_repo: Arc<B>,
    settings_provider: Arc<P>,
    notifications: Arc<N>,
    settings: RwLock<Arc<LoginSecuritySettings>>,
    config: BlockerConfig,
}

impl<U, F, B, P, N> Blocker<U, F, B, P, N>
where
    U: UserRepository,
    F: FailAttemptRepository,
    B: BlockedIpRepository,
    P: SettingsProvider,
    N: NotificationDispatcher,
{
    /// Creates a blocker with an empty policy
    ///
    /// Call [`Blocker::load_settings`] before use; until then every
    /// threshold is zero and nothing is ever blocked.
    pub fn new(
        user_repo: Arc<U>,
        fail_attempt_repo: Arc<F>,
        blocked_ip_repo: Arc<B>,
        settings_provider: Arc<P>,
        notifications: Arc<N>,
        config: BlockerConfig,
    ) -> Self {
        Self {
            user_repo,
            fail_attempt_repo,
            blocked_ip_repo,
            settings_provider,
            notifications,
            settings: RwLock::new(Arc::new(LoginSecuritySettings::default())),
            config,
        }
    }

    /// Current policy snapshot
    pub fn settings(&self) -> Arc<LoginSecuritySettings> {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Refreshes the cached policy
    ///
    /// A failed or timed out fetch is logged and the previous snapshot stays
    /// in use.
    pub async fn load_settings(&self) {
        let fetched = tokio::time::timeout(
            self.config.settings_timeout,
            self.settings_provider.get_login_security_settings(),
        )
        .await;

        match fetched {
            Ok(Ok(settings)) => {
                debug!(?settings, "Loaded login security settings");
                *self.settings.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(settings);
            }
            Ok(Err(e)) => {
                error!(error = %e, "Failed to fetch login security settings");
            }
            Err(_) => {
                error!(
                    timeout_ms = self.config.settings_timeout.as_millis() as u64,
                    "Timed out fetching login security settings"
                );
            }
        }
    }

    /// Checks whether sign-in from `ip` is allowed
    ///
    /// An expired block is deleted and the IP passes. When that deletion
    /// fails the IP stays blocked.
    pub async fn check_ip(&self, ip: &str) -> DomainResult<()> {
        if ip.is_empty() {
            return Ok(());
        }

        let blocked = match self.blocked_ip_repo.find_by_ip(ip).await {
            Ok(Some(blocked)) => blocked,
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!(ip = %ip, error = %e, "Blocked IP lookup failed, allowing sign-in");
                return Ok(());
            }
        };

        if self.unblock_ip_if_need(&blocked).await {
            return Ok(());
        }

        Err(AuthError::IpBlocked { ip: ip.to_string() }.into())
    }

    /// Checks whether the account behind `identifier` is blocked
    ///
    /// Unknown identifiers pass.
    pub async fn check_user(&self, identifier: &str) -> DomainResult<()> {
        let Some(user) = self.find_user(identifier).await else {
            return Ok(());
        };

        if user.is_blocked() {
            return Err(AuthError::UserBlocked {
                username: user.username,
            }
            .into());
        }

        Ok(())
    }

    /// Checks whether the account behind `identifier` confirmed its phone number
    ///
    /// Unknown identifiers pass.
    pub async fn check_phone_confirmed(&self, identifier: &str) -> DomainResult<()> {
        let Some(user) = self.find_user(identifier).await else {
            return Ok(());
        };

        if !user.is_phone_confirmed {
            return Err(AuthError::PhoneNotConfirmed {
                username: user.username,
                phone_number: user.phone_number,
            }
            .into());
        }

        Ok(())
    }

    /// Records a failed attempt from `ip`
    ///
    /// # Returns
    ///
    /// `true` when an attempt was recorded. `false` when IP blocking is
    /// disabled, the IP is empty, or this attempt blocked the IP.
    pub async fn add_ip_fail_attempt(&self, ip: &str) -> bool {
        if self.settings().failed_login_user_use == 0 {
            return false;
        }

        if !ip.is_empty() && !self.block_ip_if_need(ip).await {
            self.create_fail_attempt(Some(ip), None).await;
            return true;
        }

        false
    }

    /// Records a failed attempt for the account behind `identifier`
    ///
    /// The attempt is tagged with the user and, when given, the IP. It is
    /// skipped when neither the user nor the IP still needs counting because
    /// this attempt blocked them.
    pub async fn add_user_fail_attempt(&self, identifier: &str, ip: &str) -> bool {
        let user = match self.user_repo.find_by_email_or_phone_number(identifier).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("No user for failed attempt identifier");
                return false;
            }
            Err(e) => {
                error!(error = %e, "Failed to find user for failed attempt");
                return false;
            }
        };

        let settings = self.settings();

        let record_user = settings.failed_login_username_use && !self.block_user_if_need(&user).await;
        let record_ip = !ip.is_empty() && !self.block_ip_if_need(ip).await;

        if record_user || record_ip {
            let ip = (!ip.is_empty()).then_some(ip);
            self.create_fail_attempt(ip, Some(&user.uid)).await;
            return true;
        }

        false
    }

    /// Deletes the user's attempts together with every attempt older than
    /// the user window
    pub async fn clear_all_old_fail_attempts(&self, user: &User) {
        let before = minutes_from_now(-USER_FAIL_WINDOW_MINUTES);
        if let Err(e) = self.fail_attempt_repo.delete_all_old(&user.uid, before).await {
            error!(uid = %user.uid, error = %e, "Failed to delete old fail attempts");
        }
    }

    async fn find_user(&self, identifier: &str) -> Option<User> {
        match self.user_repo.find_by_email_or_phone_number(identifier).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "User lookup failed, skipping check");
                None
            }
        }
    }

    /// Returns `true` when this attempt blocked the IP
    async fn block_ip_if_need(&self, ip: &str) -> bool {
        let settings = self.settings();
        if settings.failed_login_user_use == 0 {
            return false;
        }

        let since = minutes_from_now(-IP_FAIL_WINDOW_MINUTES);
        let count = match self.fail_attempt_repo.count_by_ip(ip, since).await {
            Ok(count) => count,
            Err(e) => {
                error!(ip = %ip, error = %e, "Failed to count fail attempts by IP");
                return false;
            }
        };

        // The current attempt is not stored yet
        if count < settings.failed_login_user_use.saturating_sub(1) {
            return false;
        }

        let blocked_until = minutes_from_now(settings.failed_login_user_window as i64);
        if let Err(e) = self.blocked_ip_repo.create(ip, blocked_until).await {
            error!(ip = %ip, error = %e, "Failed to block IP");
            return false;
        }
        if let Err(e) = self.fail_attempt_repo.delete_all_by_ip(ip).await {
            error!(ip = %ip, error = %e, "Failed to delete fail attempts of blocked IP");
        }

        warn!(ip = %ip, %blocked_until, "IP blocked after failed login attempts");
        true
    }

    /// Returns `true` when the IP block expired and was removed
    async fn unblock_ip_if_need(&self, blocked: &BlockedIp) -> bool {
        if !blocked.is_expired_at(Utc::now()) {
            return false;
        }

        match self.blocked_ip_repo.delete(blocked).await {
            Ok(()) => {
                info!(ip = %blocked.ip, "Expired IP block removed");
                true
            }
            Err(e) => {
                error!(ip = %blocked.ip, error = %e, "Failed to delete expired IP block");
                false
            }
        }
    }

    /// Returns `true` when this attempt blocked the user
    async fn block_user_if_need(&self, user: &User) -> bool {
        let settings = self.settings();
        if settings.failed_login_username_limit == 0 {
            return false;
        }

        let since = minutes_from_now(-USER_FAIL_WINDOW_MINUTES);
        let count = match self.fail_attempt_repo.count_by_uid(&user.uid, since).await {
            Ok(count) => count,
            Err(e) => {
                error!(uid = %user.uid, error = %e, "Failed to count fail attempts by user");
                return false;
            }
        };

        // The current attempt is not stored yet
        if count < settings.failed_login_username_limit.saturating_sub(1) {
            return false;
        }

        let blocked_until = minutes_from_now(settings.failed_login_username_cleanup as i64);
        if let Err(e) = self
            .user_repo
            .update_blocked_until(&user.uid, Some(blocked_until))
            .await
        {
            error!(uid = %user.uid, error = %e, "Failed to block user");
        }

        // Attempts stay for IP counting
        if let Err(e) = self.fail_attempt_repo.impersonate_all_by_uid(&user.uid).await {
            error!(uid = %user.uid, error = %e, "Failed to impersonate fail attempts");
        }

        self.notify_blocked(&user.uid).await;

        warn!(uid = %user.uid, %blocked_until, "User blocked after failed login attempts");
        true
    }

    async fn notify_blocked(&self, uid: &str) {
        let sent = tokio::time::timeout(
            self.config.notification_timeout,
            self.notifications.notify_failed_login_attempts(uid),
        )
        .await;

        match sent {
            Ok(Ok(())) => debug!(uid = %uid, "Sent failed login attempts notification"),
            Ok(Err(e)) => error!(uid = %uid, error = %e, "Can't send notification"),
            Err(_) => error!(uid = %uid, "Timed out sending notification"),
        }
    }

    async fn create_fail_attempt(&self, ip: Option<&str>, uid: Option<&str>) {
        if let Err(e) = self.fail_attempt_repo.create(ip, uid).await {
            error!(ip = ?ip, uid = ?uid, error = %e, "Failed to create fail attempt");
        }
    }
}

fn minutes_from_now(minutes: i64) -> DateTime<Utc> {
    Utc::now() + Duration::minutes(minutes)
}
