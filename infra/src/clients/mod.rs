//! HTTP clients for the settings and notification services
//!
//! Both services expose JSON endpoints under `/twirp/<package>.<Service>/<Method>`.

pub mod notifications;
pub mod settings;

pub use notifications::HttpNotificationDispatcher;
pub use settings::{HttpSettingsProvider, Setting};

use std::time::Duration;

use reqwest::Client;

use crate::InfrastructureError;

/// Build the shared HTTP client with a per-request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client, InfrastructureError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("wallet-users/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Join a base URL and a route, tolerating a trailing slash on the base
pub(crate) fn endpoint(base_url: &str, route: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), route)
}
