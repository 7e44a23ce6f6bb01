//! MySQL implementation of the TokenRepository trait.
//!
//! Finders left join the owner so found tokens carry a user snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use wu_core::domain::entities::token::{Token, TokenSubject};
use wu_core::errors::{DomainError, TokenError};
use wu_core::repositories::TokenRepository;

use super::user_repository_impl::{row_to_user, USER_COLUMNS};
use super::{column_error, parse_uuid, storage_error};

const TOKEN_COLUMNS: &str =
    "t.id, t.subject, t.signed_string, t.user_uid, t.refresh_token_id, t.created_at";

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn select(filter: &str) -> String {
        format!(
            "SELECT {}, {} FROM tokens t LEFT JOIN users u ON u.uid = t.user_uid WHERE {}",
            TOKEN_COLUMNS, USER_COLUMNS, filter
        )
    }

    /// Convert a joined row to a Token with its owner snapshot
    fn row_to_token(row: &MySqlRow) -> Result<Token, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let subject: String = row
            .try_get("subject")
            .map_err(|e| column_error("subject", e))?;
        let refresh_token_id: Option<String> = row
            .try_get("refresh_token_id")
            .map_err(|e| column_error("refresh_token_id", e))?;

        Ok(Token {
            id: parse_uuid("id", &id)?,
            subject: subject
                .parse::<TokenSubject>()
                .map_err(|e| column_error("subject", e))?,
            signed_string: row
                .try_get("signed_string")
                .map_err(|e| column_error("signed_string", e))?,
            user_uid: row
                .try_get("user_uid")
                .map_err(|e| column_error("user_uid", e))?,
            refresh_token_id: refresh_token_id
                .as_deref()
                .map(|value| parse_uuid("refresh_token_id", value))
                .transpose()?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            user: row_to_user(row)?,
        })
    }

    async fn fetch_one_where(
        &self,
        filter: &str,
        binds: &[&str],
        operation: &'static str,
    ) -> Result<Option<Token>, DomainError> {
        let query = Self::select(filter);
        let mut q = sqlx::query(&query);
        for value in binds {
            q = q.bind(*value);
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error(operation))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn create(&self, token: Token) -> Result<Token, DomainError> {
        let query = r#"
            INSERT INTO tokens (
                id, subject, signed_string, user_uid, refresh_token_id, created_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.subject.as_str())
            .bind(&token.signed_string)
            .bind(&token.user_uid)
            .bind(token.refresh_token_id.map(|id| id.to_string()))
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: "Token already exists".to_string(),
                    }
                }
                other => storage_error("save token")(other),
            })?;

        Ok(Token { user: None, ..token })
    }

    async fn delete(&self, token: &Token) -> Result<(), DomainError> {
        self.delete_by_id(token.id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM tokens WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error("delete token"))?;

        if result.rows_affected() == 0 {
            return Err(TokenError::TokenNotFound.into());
        }
        Ok(())
    }

    async fn delete_tokens_by_uid(&self, uid: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_uid = ?")
            .bind(uid)
            .execute(&self.pool)
            .await
            .map_err(storage_error("delete user tokens"))?;

        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError> {
        let id = id.to_string();
        self.fetch_one_where("t.id = ? LIMIT 1", &[id.as_str()], "find token by id")
            .await
    }

    async fn find_by_signed_string(
        &self,
        signed_string: &str,
    ) -> Result<Option<Token>, DomainError> {
        self.fetch_one_where(
            "t.signed_string = ? LIMIT 1",
            &[signed_string],
            "find token by signed string",
        )
        .await
    }

    async fn find_by_signed_string_and_subject(
        &self,
        signed_string: &str,
        subject: TokenSubject,
    ) -> Result<Option<Token>, DomainError> {
        self.fetch_one_where(
            "t.signed_string = ? AND t.subject = ? LIMIT 1",
            &[signed_string, subject.as_str()],
            "find token by signed string and subject",
        )
        .await
    }

    async fn find_by_subject(&self, subject: TokenSubject) -> Result<Vec<Token>, DomainError> {
        let query = Self::select("t.subject = ? ORDER BY t.created_at");

        let rows = sqlx::query(&query)
            .bind(subject.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find tokens by subject"))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn find_access_token_by_refresh_token_id(
        &self,
        refresh_token_id: Uuid,
    ) -> Result<Option<Token>, DomainError> {
        let refresh_token_id = refresh_token_id.to_string();
        self.fetch_one_where(
            "t.refresh_token_id = ? AND t.subject = 'access' LIMIT 1",
            &[refresh_token_id.as_str()],
            "find access token by refresh token id",
        )
        .await
    }
}
