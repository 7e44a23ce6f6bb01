//! Settings provider trait

use async_trait::async_trait;

use crate::domain::entities::login_security::{AutologoutSettings, LoginSecuritySettings};
use crate::errors::DomainResult;

/// Source of the externally managed login security and autologout policy
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Fetch the current login security policy
    async fn get_login_security_settings(&self) -> DomainResult<LoginSecuritySettings>;

    /// Fetch the current autologout policy
    async fn get_autologout_settings(&self) -> DomainResult<AutologoutSettings>;
}
