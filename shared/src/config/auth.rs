//! Token signing, token lifetime and login security configuration

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Signing methods accepted for access, refresh and temporary tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum SigningMethod {
    HS256,
    HS384,
    HS512,
    ES256,
    ES384,
    RS256,
    RS384,
    RS512,
}

impl SigningMethod {
    /// All supported methods, in the order they are listed in error messages
    pub const ALL: [SigningMethod; 8] = [
        SigningMethod::ES256,
        SigningMethod::ES384,
        SigningMethod::HS256,
        SigningMethod::HS384,
        SigningMethod::HS512,
        SigningMethod::RS256,
        SigningMethod::RS384,
        SigningMethod::RS512,
    ];

    /// Whether the method signs with a shared secret
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            SigningMethod::HS256 | SigningMethod::HS384 | SigningMethod::HS512
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SigningMethod::HS256 => "HS256",
            SigningMethod::HS384 => "HS384",
            SigningMethod::HS512 => "HS512",
            SigningMethod::ES256 => "ES256",
            SigningMethod::ES384 => "ES384",
            SigningMethod::RS256 => "RS256",
            SigningMethod::RS384 => "RS384",
            SigningMethod::RS512 => "RS512",
        }
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SigningMethod::ALL
            .iter()
            .copied()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedSigningMethod(s.to_string()))
    }
}

impl TryFrom<String> for SigningMethod {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SigningMethod> for String {
    fn from(method: SigningMethod) -> Self {
        method.as_str().to_string()
    }
}

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Signing method used for every issued token
    #[serde(default = "default_signing_method")]
    pub signing_method: SigningMethod,

    /// Shared secret, required by the HMAC methods
    #[serde(default)]
    pub secret: Option<String>,

    /// PEM private key, used by the ECDSA and RSA methods
    #[serde(default = "default_private_key_path")]
    pub private_key_path: PathBuf,

    /// PEM public key, used by the ECDSA and RSA methods
    #[serde(default = "default_public_key_path")]
    pub public_key_path: PathBuf,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            signing_method: default_signing_method(),
            secret: None,
            private_key_path: default_private_key_path(),
            public_key_path: default_public_key_path(),
        }
    }
}

impl JwtConfig {
    /// HMAC configuration with the given secret
    pub fn hmac(method: SigningMethod, secret: impl Into<String>) -> Self {
        Self {
            signing_method: method,
            secret: Some(secret.into()),
            ..Default::default()
        }
    }

    /// Key pair configuration reading the PEM files at the given paths
    pub fn key_pair(
        method: SigningMethod,
        private_key_path: impl Into<PathBuf>,
        public_key_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            signing_method: method,
            secret: None,
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
        }
    }

    /// Checks that the settings required by the signing method are present.
    ///
    /// File existence is checked when the key pair is loaded, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signing_method.is_symmetric() {
            match self.secret.as_deref() {
                Some(secret) if !secret.is_empty() => Ok(()),
                _ => Err(ConfigError::MissingSecret {
                    method: self.signing_method.to_string(),
                }),
            }
        } else {
            if self.private_key_path.as_os_str().is_empty() {
                return Err(ConfigError::MissingKeyPath {
                    method: self.signing_method.to_string(),
                    field: "private_key_path".to_string(),
                });
            }
            if self.public_key_path.as_os_str().is_empty() {
                return Err(ConfigError::MissingKeyPath {
                    method: self.signing_method.to_string(),
                    field: "public_key_path".to_string(),
                });
            }
            Ok(())
        }
    }
}

/// Which policy computes token lifetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TtlPolicy {
    /// Derived from the autologout settings of the settings service
    Adaptive,
    /// Constant lifetimes from this configuration
    Fixed,
}

/// Token lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenTtlConfig {
    #[serde(default = "default_ttl_policy")]
    pub policy: TtlPolicy,

    /// Access token lifetime in seconds for the fixed policy
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,

    /// Refresh token lifetime in seconds for the fixed policy
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
}

impl Default for TokenTtlConfig {
    fn default() -> Self {
        Self {
            policy: default_ttl_policy(),
            access_ttl_seconds: default_access_ttl(),
            refresh_ttl_seconds: default_refresh_ttl(),
        }
    }
}

impl TokenTtlConfig {
    /// Fixed lifetimes, in seconds
    pub fn fixed(access_ttl_seconds: u64, refresh_ttl_seconds: u64) -> Self {
        Self {
            policy: TtlPolicy::Fixed,
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }
}

/// Deadlines applied by the login blocker to its external calls
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginSecurityConfig {
    /// Timeout for fetching login security settings, in milliseconds
    #[serde(default = "default_settings_timeout")]
    pub settings_timeout_ms: u64,

    /// Timeout for dispatching the blocked-account notification, in milliseconds
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_ms: u64,
}

impl Default for LoginSecurityConfig {
    fn default() -> Self {
        Self {
            settings_timeout_ms: default_settings_timeout(),
            notification_timeout_ms: default_notification_timeout(),
        }
    }
}

fn default_signing_method() -> SigningMethod {
    SigningMethod::ES256
}

fn default_private_key_path() -> PathBuf {
    PathBuf::from("./keys/jwt.pem")
}

fn default_public_key_path() -> PathBuf {
    PathBuf::from("./keys/jwt.pub")
}

fn default_ttl_policy() -> TtlPolicy {
    TtlPolicy::Adaptive
}

fn default_access_ttl() -> u64 {
    1800 // 30 minutes
}

fn default_refresh_ttl() -> u64 {
    2_592_000 // 720 hours
}

fn default_settings_timeout() -> u64 {
    3000
}

fn default_notification_timeout() -> u64 {
    5000
}
