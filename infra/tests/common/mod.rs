//! Shared fixtures for the infrastructure integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wu_core::domain::entities::login_security::{AutologoutSettings, LoginSecuritySettings};
use wu_core::domain::entities::user::{User, UserStatus};
use wu_core::errors::{DomainError, DomainResult};
use wu_core::services::{NotificationDispatcher, SettingsProvider};
use wu_infra::bootstrap::{AuthServices, AuthStores};
use wu_infra::memory::{
    MemoryBlockedIpRepository, MemoryFailAttemptRepository, MemoryTokenRepository,
    MemoryUserRepository,
};
use wu_shared::config::{AppConfig, Environment, JwtConfig, SigningMethod, TokenTtlConfig};

pub type TestServices = AuthServices<
    MemoryTokenRepository,
    MemoryUserRepository,
    MemoryFailAttemptRepository,
    MemoryBlockedIpRepository,
    StaticSettingsProvider,
    RecordingDispatcher,
>;

/// Settings provider returning whatever policy the test sets
#[derive(Default)]
pub struct StaticSettingsProvider {
    login: Mutex<LoginSecuritySettings>,
    autologout: Mutex<AutologoutSettings>,
}

impl StaticSettingsProvider {
    pub fn new(login: LoginSecuritySettings, autologout: AutologoutSettings) -> Self {
        Self {
            login: Mutex::new(login),
            autologout: Mutex::new(autologout),
        }
    }

    pub fn set_login(&self, login: LoginSecuritySettings) {
        *self.login.lock().unwrap() = login;
    }
}

#[async_trait]
impl SettingsProvider for StaticSettingsProvider {
    async fn get_login_security_settings(&self) -> DomainResult<LoginSecuritySettings> {
        Ok(self.login.lock().unwrap().clone())
    }

    async fn get_autologout_settings(&self) -> DomainResult<AutologoutSettings> {
        Ok(self.autologout.lock().unwrap().clone())
    }
}

/// Dispatcher remembering every notified user
#[derive(Default)]
pub struct RecordingDispatcher {
    notified: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingDispatcher {
    pub fn failing() -> Self {
        Self {
            notified: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn notified(&self) -> Vec<String> {
        self.notified.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn notify_failed_login_attempts(&self, uid: &str) -> DomainResult<()> {
        self.notified.lock().unwrap().push(uid.to_string());
        if self.fail {
            return Err(DomainError::Notification {
                message: "notification service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub struct Harness {
    pub services: TestServices,
    pub users: Arc<MemoryUserRepository>,
    pub tokens: Arc<MemoryTokenRepository>,
    pub fail_attempts: Arc<MemoryFailAttemptRepository>,
    pub blocked_ips: Arc<MemoryBlockedIpRepository>,
    pub settings: Arc<StaticSettingsProvider>,
    pub notifications: Arc<RecordingDispatcher>,
}

pub fn hmac_config(token_ttl: TokenTtlConfig) -> AppConfig {
    let mut config = AppConfig::for_environment(Environment::Development);
    config.jwt = JwtConfig::hmac(SigningMethod::HS256, "integration-test-secret");
    config.token_ttl = token_ttl;
    config
}

pub fn login_policy(ip_limit: u64, user_limit: u64) -> LoginSecuritySettings {
    LoginSecuritySettings {
        failed_login_username_cleanup: 20,
        failed_login_username_limit: user_limit,
        failed_login_username_use: user_limit > 0,
        failed_login_user_use: ip_limit,
        failed_login_user_window: 15,
    }
}

pub async fn harness_with(
    config: &AppConfig,
    settings: StaticSettingsProvider,
    notifications: RecordingDispatcher,
) -> Harness {
    let users = Arc::new(MemoryUserRepository::new());
    let tokens = Arc::new(MemoryTokenRepository::new(Arc::clone(&users)));
    let fail_attempts = Arc::new(MemoryFailAttemptRepository::new());
    let blocked_ips = Arc::new(MemoryBlockedIpRepository::new());
    let settings = Arc::new(settings);
    let notifications = Arc::new(notifications);

    let stores = AuthStores {
        tokens: Arc::clone(&tokens),
        users: Arc::clone(&users),
        fail_attempts: Arc::clone(&fail_attempts),
        blocked_ips: Arc::clone(&blocked_ips),
    };

    let services = AuthServices::build(
        config,
        stores,
        Arc::clone(&settings),
        Arc::clone(&notifications),
    )
    .await
    .expect("services should build");

    Harness {
        services,
        users,
        tokens,
        fail_attempts,
        blocked_ips,
        settings,
        notifications,
    }
}

pub async fn harness(config: &AppConfig) -> Harness {
    harness_with(
        config,
        StaticSettingsProvider::default(),
        RecordingDispatcher::default(),
    )
    .await
}

pub fn active_user(uid: &str) -> User {
    let mut user = User::new(uid, format!("{}-name", uid));
    user.email = format!("{}@example.com", uid);
    user.phone_number = format!("+1555-{}", uid);
    user.role_name = "client".to_string();
    user.status = UserStatus::Active;
    user.is_phone_confirmed = true;
    user
}
