//! Failed login records and the policy values that drive blocking.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A failed login attempt
///
/// Attempts are impersonated once their account gets blocked: they keep
/// counting towards the IP but no longer towards the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailAttempt {
    pub id: Uuid,
    pub ip: Option<String>,
    pub uid: Option<String>,
    pub created_at: DateTime<Utc>,
    pub impersonated: bool,
}

impl FailAttempt {
    pub fn new(ip: Option<String>, uid: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ip,
            uid,
            created_at: Utc::now(),
            impersonated: false,
        }
    }
}

/// An IP address blocked after repeated failed logins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedIp {
    pub id: Uuid,
    pub ip: String,
    pub created_at: DateTime<Utc>,
    pub blocked_until: DateTime<Utc>,
}

impl BlockedIp {
    pub fn new(ip: impl Into<String>, blocked_until: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ip: ip.into(),
            created_at: Utc::now(),
            blocked_until,
        }
    }

    /// Whether the block has elapsed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.blocked_until < now
    }
}

/// Login security policy from the settings service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSecuritySettings {
    /// Minutes an account stays blocked
    pub failed_login_username_cleanup: u64,
    /// Failed attempts per account before blocking, 0 disables
    pub failed_login_username_limit: u64,
    /// Whether account blocking is enabled
    pub failed_login_username_use: bool,
    /// Failed attempts per IP before blocking, 0 disables
    pub failed_login_user_use: u64,
    /// Minutes an IP stays blocked
    pub failed_login_user_window: u64,
}

/// Autologout policy from the settings service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutologoutSettings {
    pub enabled: bool,
    /// Inactivity timeout
    pub timeout: Duration,
    /// Grace period added to the timeout
    pub padding: Duration,
}

impl Default for AutologoutSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout: Duration::zero(),
            padding: Duration::zero(),
        }
    }
}
