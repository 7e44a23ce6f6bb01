//! Token entities for JWT-based authentication.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Subject of temporary tokens issued to accounts that are not yet active
pub const TEMPORARY_TOKEN_SUBJECT: &str = "limited_auth";

/// Lifetime of temporary tokens (24 hours)
pub const TEMPORARY_TOKEN_EXPIRY_HOURS: i64 = 24;

/// Kind of a persisted token, stored as the `sub` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSubject {
    /// Short-lived credential authorizing API calls
    Access,
    /// Long-lived credential used to rotate the pair
    Refresh,
}

impl TokenSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSubject::Access => "access",
            TokenSubject::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenSubject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenSubject::Access),
            "refresh" => Ok(TokenSubject::Refresh),
            _ => Err(format!("Unknown token subject: {}", s)),
        }
    }
}

/// Claims carried by access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    /// Token subject (`access` or `refresh`)
    pub sub: String,

    /// JWT ID, the identifier of the persisted token record
    pub jti: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Owning user identifier
    pub uid: String,

    pub role_name: String,

    pub parent_id: String,

    pub username: String,

    pub first_name: String,

    pub last_name: String,
}

impl TokenClaims {
    /// Creates claims for the given user
    ///
    /// # Arguments
    ///
    /// * `token_id` - Identifier of the token record the claims are signed for
    /// * `subject` - Token kind
    /// * `user` - Owner of the token
    /// * `expires_at` - Expiration time
    pub fn for_user(
        token_id: Uuid,
        subject: TokenSubject,
        user: &User,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.as_str().to_string(),
            jti: token_id.to_string(),
            exp: expires_at.timestamp(),
            uid: user.uid.clone(),
            role_name: user.role_name.clone(),
            parent_id: user.parent_id.clone().unwrap_or_default(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Claims carried by temporary tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryClaims {
    pub sub: String,
    pub exp: i64,
    pub uid: String,
}

/// Persisted token record
///
/// Access tokens reference the refresh token they were issued with through
/// `refresh_token_id`; refresh tokens never reference another token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier for the token
    pub id: Uuid,

    pub subject: TokenSubject,

    /// The signed JWT
    pub signed_string: String,

    /// Owning user identifier
    pub user_uid: String,

    /// Refresh token this access token was paired with
    pub refresh_token_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    /// Owner snapshot attached by stores that can join the user record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Token {
    /// Creates a new refresh token record
    pub fn new_refresh(user_uid: impl Into<String>, signed_string: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: TokenSubject::Refresh,
            signed_string: signed_string.into(),
            user_uid: user_uid.into(),
            refresh_token_id: None,
            created_at: Utc::now(),
            user: None,
        }
    }

    /// Creates a new access token record paired with `refresh_token_id`
    pub fn new_access(
        user_uid: impl Into<String>,
        signed_string: impl Into<String>,
        refresh_token_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: TokenSubject::Access,
            signed_string: signed_string.into(),
            user_uid: user_uid.into(),
            refresh_token_id: Some(refresh_token_id),
            created_at: Utc::now(),
            user: None,
        }
    }

    /// Attaches the owner snapshot
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn is_access(&self) -> bool {
        self.subject == TokenSubject::Access
    }
}

/// Signed access and refresh token strings returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
