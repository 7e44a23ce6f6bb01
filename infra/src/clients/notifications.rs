//! Notification service client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use wu_core::errors::{DomainError, DomainResult};
use wu_core::services::NotificationDispatcher;
use wu_shared::config::ServicesConfig;

use super::{build_client, endpoint};
use crate::InfrastructureError;

const DISPATCH_ROUTE: &str = "/twirp/notifications.NotificationHandler/Dispatch";

/// Event sent when an account gets blocked after failed logins
pub const FAILED_LOGIN_ATTEMPTS_EVENT: &str = "FailedLoginAttempts";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DispatchRequest<'a> {
    to: &'a str,
    event_name: &'a str,
}

/// Notification dispatcher backed by the notification service
pub struct HttpNotificationDispatcher {
    client: Client,
    dispatch_url: String,
}

impl HttpNotificationDispatcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            dispatch_url: endpoint(base_url, DISPATCH_ROUTE),
        })
    }

    pub fn from_config(config: &ServicesConfig) -> Result<Self, InfrastructureError> {
        Self::new(
            &config.notifications_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    async fn dispatch(&self, to: &str, event_name: &str) -> DomainResult<()> {
        let notification_error = |e: reqwest::Error| DomainError::Notification {
            message: format!("Failed to dispatch {} to {}: {}", event_name, to, e),
        };

        self.client
            .post(&self.dispatch_url)
            .json(&DispatchRequest { to, event_name })
            .send()
            .await
            .map_err(notification_error)?
            .error_for_status()
            .map_err(notification_error)?;

        tracing::debug!(to, event_name, "Notification dispatched");
        Ok(())
    }
}

#[async_trait]
impl NotificationDispatcher for HttpNotificationDispatcher {
    async fn notify_failed_login_attempts(&self, uid: &str) -> DomainResult<()> {
        self.dispatch(uid, FAILED_LOGIN_ATTEMPTS_EVENT).await
    }
}
