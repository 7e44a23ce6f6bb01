//! User entity as seen by the token and login security services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Pending,
    Active,
    Blocked,
    Dormant,
    Canceled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
            UserStatus::Dormant => "dormant",
            UserStatus::Canceled => "canceled",
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "active" => Ok(UserStatus::Active),
            "blocked" => Ok(UserStatus::Blocked),
            "dormant" => Ok(UserStatus::Dormant),
            "canceled" => Ok(UserStatus::Canceled),
            _ => Err(format!("Unknown user status: {}", s)),
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user
    pub uid: String,

    pub email: String,

    pub username: String,

    pub phone_number: String,

    pub first_name: String,

    pub last_name: String,

    pub role_name: String,

    /// Owning account for sub-users
    pub parent_id: Option<String>,

    pub status: UserStatus,

    /// Set while the account is blocked after repeated failed logins
    pub blocked_until: Option<DateTime<Utc>>,

    pub is_phone_confirmed: bool,
}

impl User {
    /// Creates a pending user with the given identifier and username
    pub fn new(uid: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: String::new(),
            username: username.into(),
            phone_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role_name: String::new(),
            parent_id: None,
            status: UserStatus::Pending,
            blocked_until: None,
            is_phone_confirmed: false,
        }
    }

    /// Whether the account is blocked at the current time
    pub fn is_blocked(&self) -> bool {
        self.is_blocked_at(Utc::now())
    }

    /// Whether the account is blocked at `now`
    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.blocked_until, Some(until) if until > now)
    }
}
