//! Settings service client
//!
//! Policies are read as flat `{path, value}` lists selected by a path
//! prefix, then parsed into the domain settings types.

use std::num::IntErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use wu_core::domain::entities::login_security::{AutologoutSettings, LoginSecuritySettings};
use wu_core::errors::{DomainError, DomainResult};
use wu_core::services::SettingsProvider;
use wu_shared::config::ServicesConfig;

use super::{build_client, endpoint};
use crate::InfrastructureError;

const LIST_ROUTE: &str = "/twirp/settings.SettingsHandler/List";

const LOGIN_PREFIX: &str = "regional/login/%";
const AUTOLOGOUT_PREFIX: &str = "profile/autologout/%";

const LOGIN_USERNAME_CLEANUP: &str = "regional/login/failed_login_username_cleanup";
const LOGIN_USERNAME_LIMIT: &str = "regional/login/failed_login_username_limit";
const LOGIN_USERNAME_USE: &str = "regional/login/failed_login_username_use";
const LOGIN_USER_USE: &str = "regional/login/failed_login_user_use";
const LOGIN_USER_WINDOW: &str = "regional/login/failed_login_user_window";

const AUTOLOGOUT_STATUS: &str = "profile/autologout/status";
const AUTOLOGOUT_TIMEOUT: &str = "profile/autologout/timeout";
const AUTOLOGOUT_PADDING: &str = "profile/autologout/padding";

/// A single setting entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub path: String,
    #[serde(default)]
    pub value: String,
}

impl Setting {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

#[derive(Serialize)]
struct ListRequest<'a> {
    path: &'a str,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    settings: Vec<Setting>,
}

/// Value at `path`, empty when absent
fn value_of<'a>(settings: &'a [Setting], path: &str) -> &'a str {
    settings
        .iter()
        .find(|s| s.path == path)
        .map(|s| s.value.as_str())
        .unwrap_or("")
}

/// Build the login security policy
///
/// Numeric values that are missing or unparsable read as 0, values above
/// `u16::MAX` saturate.
pub fn parse_login_security_settings(settings: &[Setting]) -> LoginSecuritySettings {
    let number = |path: &str| -> u64 {
        match value_of(settings, path).parse::<u16>() {
            Ok(value) => u64::from(value),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::from(u16::MAX),
            Err(_) => 0,
        }
    };

    LoginSecuritySettings {
        failed_login_username_cleanup: number(LOGIN_USERNAME_CLEANUP),
        failed_login_username_limit: number(LOGIN_USERNAME_LIMIT),
        failed_login_username_use: value_of(settings, LOGIN_USERNAME_USE) == "yes",
        failed_login_user_use: number(LOGIN_USER_USE),
        failed_login_user_window: number(LOGIN_USER_WINDOW),
    }
}

/// Build the autologout policy
///
/// `timeout` is in minutes and `padding` in seconds; either one missing or
/// unparsable is an error.
pub fn parse_autologout_settings(settings: &[Setting]) -> DomainResult<AutologoutSettings> {
    let number = |path: &str| -> DomainResult<i64> {
        let raw = value_of(settings, path);
        raw.parse::<u32>()
            .map(i64::from)
            .map_err(|e| DomainError::Settings {
                message: format!("Invalid value {:?} for {}: {}", raw, path, e),
            })
    };

    let timeout = number(AUTOLOGOUT_TIMEOUT)?;
    let padding = number(AUTOLOGOUT_PADDING)?;

    Ok(AutologoutSettings {
        enabled: value_of(settings, AUTOLOGOUT_STATUS) == "yes",
        timeout: chrono::Duration::minutes(timeout),
        padding: chrono::Duration::seconds(padding),
    })
}

/// Settings provider backed by the settings service
pub struct HttpSettingsProvider {
    client: Client,
    list_url: String,
}

impl HttpSettingsProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            list_url: endpoint(base_url, LIST_ROUTE),
        })
    }

    pub fn from_config(config: &ServicesConfig) -> Result<Self, InfrastructureError> {
        Self::new(
            &config.settings_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// List every setting under a path prefix
    pub async fn list(&self, prefix: &str) -> DomainResult<Vec<Setting>> {
        let settings_error = |e: reqwest::Error| {
            tracing::error!(prefix, error = %e, "Settings request failed");
            DomainError::Settings {
                message: format!("Failed to list {}: {}", prefix, e),
            }
        };

        let response = self
            .client
            .post(&self.list_url)
            .json(&ListRequest { path: prefix })
            .send()
            .await
            .map_err(settings_error)?
            .error_for_status()
            .map_err(settings_error)?;

        let body: ListResponse = response.json().await.map_err(settings_error)?;
        tracing::debug!(prefix, count = body.settings.len(), "Fetched settings");
        Ok(body.settings)
    }
}

#[async_trait]
impl SettingsProvider for HttpSettingsProvider {
    async fn get_login_security_settings(&self) -> DomainResult<LoginSecuritySettings> {
        let settings = self.list(LOGIN_PREFIX).await?;
        Ok(parse_login_security_settings(&settings))
    }

    async fn get_autologout_settings(&self) -> DomainResult<AutologoutSettings> {
        let settings = self.list(AUTOLOGOUT_PREFIX).await?;
        parse_autologout_settings(&settings)
    }
}
