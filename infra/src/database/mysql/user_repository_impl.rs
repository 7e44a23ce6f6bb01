//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use wu_core::domain::entities::user::{User, UserStatus};
use wu_core::errors::DomainError;
use wu_core::repositories::UserRepository;

use super::{column_error, storage_error};

/// Column list shared with the token store join, every column prefixed
pub(crate) const USER_COLUMNS: &str = "u.uid AS u_uid, u.email AS u_email, \
     u.username AS u_username, u.phone_number AS u_phone_number, \
     u.first_name AS u_first_name, u.last_name AS u_last_name, \
     u.role_name AS u_role_name, u.parent_id AS u_parent_id, \
     u.status AS u_status, u.blocked_until AS u_blocked_until, \
     u.is_phone_confirmed AS u_is_phone_confirmed";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Read a user from `u_`-prefixed columns
///
/// Returns `None` when the row carries no user, as with an unmatched
/// left join.
pub(crate) fn row_to_user(row: &MySqlRow) -> Result<Option<User>, DomainError> {
    let uid: Option<String> = row
        .try_get("u_uid")
        .map_err(|e| column_error("u_uid", e))?;
    let Some(uid) = uid else {
        return Ok(None);
    };

    let text = |column: &str| -> Result<String, DomainError> {
        row.try_get::<String, _>(column)
            .map_err(|e| column_error(column, e))
    };

    let status: String = text("u_status")?;
    let status = status
        .parse::<UserStatus>()
        .map_err(|e| column_error("u_status", e))?;

    Ok(Some(User {
        uid,
        email: text("u_email")?,
        username: text("u_username")?,
        phone_number: text("u_phone_number")?,
        first_name: text("u_first_name")?,
        last_name: text("u_last_name")?,
        role_name: text("u_role_name")?,
        parent_id: row
            .try_get("u_parent_id")
            .map_err(|e| column_error("u_parent_id", e))?,
        status,
        blocked_until: row
            .try_get::<Option<DateTime<Utc>>, _>("u_blocked_until")
            .map_err(|e| column_error("u_blocked_until", e))?,
        is_phone_confirmed: row
            .try_get("u_is_phone_confirmed")
            .map_err(|e| column_error("u_is_phone_confirmed", e))?,
    }))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email_or_phone_number(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError> {
        if identifier.is_empty() {
            return Ok(None);
        }

        let query = format!(
            "SELECT {} FROM users u WHERE u.email = ? OR u.phone_number = ? LIMIT 1",
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("find user by email or phone number"))?;

        match row {
            Some(row) => row_to_user(&row),
            None => Ok(None),
        }
    }

    async fn update_blocked_until(
        &self,
        uid: &str,
        blocked_until: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET blocked_until = ? WHERE uid = ?")
            .bind(blocked_until)
            .bind(uid)
            .execute(&self.pool)
            .await
            .map_err(storage_error("update user blocked_until"))?;

        if result.rows_affected() == 0 {
            tracing::debug!(uid, "blocked_until update matched no changed rows");
        }

        Ok(())
    }
}
