//! Mock settings provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::entities::login_security::{AutologoutSettings, LoginSecuritySettings};
use crate::errors::{DomainError, DomainResult};

use super::provider::SettingsProvider;

#[derive(Default)]
pub struct MockSettingsProvider {
    login: Mutex<LoginSecuritySettings>,
    autologout: Mutex<AutologoutSettings>,
    should_fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
    login_calls: AtomicUsize,
}

impl MockSettingsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login_settings(settings: LoginSecuritySettings) -> Self {
        let provider = Self::default();
        provider.set_login_settings(settings);
        provider
    }

    pub fn with_autologout(settings: AutologoutSettings) -> Self {
        let provider = Self::default();
        *provider.autologout.lock().unwrap() = settings;
        provider
    }

    pub fn set_login_settings(&self, settings: LoginSecuritySettings) {
        *self.login.lock().unwrap() = settings;
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Delay every response, used to exercise deadlines
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    async fn respond<T>(&self, value: T) -> DomainResult<T> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Settings {
                message: "settings service unavailable".to_string(),
            });
        }
        Ok(value)
    }
}

#[async_trait]
impl SettingsProvider for MockSettingsProvider {
    async fn get_login_security_settings(&self) -> DomainResult<LoginSecuritySettings> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let settings = self.login.lock().unwrap().clone();
        self.respond(settings).await
    }

    async fn get_autologout_settings(&self) -> DomainResult<AutologoutSettings> {
        let settings = self.autologout.lock().unwrap().clone();
        self.respond(settings).await
    }
}
