//! Configuration for the login blocker

use std::time::Duration;

use wu_shared::config::LoginSecurityConfig;

/// Deadlines for the blocker's calls to external services
#[derive(Debug, Clone)]
pub struct BlockerConfig {
    /// Deadline for fetching the login security policy
    pub settings_timeout: Duration,
    /// Deadline for dispatching the blocked-account notification
    pub notification_timeout: Duration,
}

impl Default for BlockerConfig {
    fn default() -> Self {
        Self::from(&LoginSecurityConfig::default())
    }
}

impl From<&LoginSecurityConfig> for BlockerConfig {
    fn from(config: &LoginSecurityConfig) -> Self {
        Self {
            settings_timeout: Duration::from_millis(config.settings_timeout_ms),
            notification_timeout: Duration::from_millis(config.notification_timeout_ms),
        }
    }
}
