use async_trait::async_trait;

use crate::errors::DomainResult;

/// Sends user notifications through the notification service
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Notify a user that their account was blocked after failed logins
    async fn notify_failed_login_attempts(&self, uid: &str) -> DomainResult<()>;
}
