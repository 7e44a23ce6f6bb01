//! Endpoints of the settings and notification services

use serde::{Deserialize, Serialize};

/// External service endpoints consumed by the login security subsystem
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServicesConfig {
    /// Base URL of the system settings service
    pub settings_url: String,

    /// Base URL of the notification service
    pub notifications_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            settings_url: String::from("http://localhost:10001"),
            notifications_url: String::from("http://localhost:10002"),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    3000
}
