//! Mock notification dispatcher for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::{DomainError, DomainResult};

use super::dispatcher::NotificationDispatcher;

#[derive(Default)]
pub struct MockNotificationDispatcher {
    pub sent: Arc<Mutex<Vec<String>>>,
    should_fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl MockNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationDispatcher for MockNotificationDispatcher {
    async fn notify_failed_login_attempts(&self, uid: &str) -> DomainResult<()> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Notification {
                message: "notification service unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(uid.to_string());
        Ok(())
    }
}
