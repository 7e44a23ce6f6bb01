//! MySQL implementation of the FailAttemptRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use wu_core::errors::DomainError;
use wu_core::repositories::FailAttemptRepository;

use super::storage_error;

/// MySQL implementation of FailAttemptRepository backed by `fail_auth_attempts`
pub struct MySqlFailAttemptRepository {
    pool: MySqlPool,
}

impl MySqlFailAttemptRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn count(
        &self,
        query: &str,
        key: &str,
        since: DateTime<Utc>,
        operation: &'static str,
    ) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(query)
            .bind(key)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error(operation))?;

        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl FailAttemptRepository for MySqlFailAttemptRepository {
    async fn create(&self, ip: Option<&str>, uid: Option<&str>) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO fail_auth_attempts (id, ip, uid, impersonated, created_at) \
             VALUES (?, ?, ?, FALSE, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(ip)
        .bind(uid)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(storage_error("save fail attempt"))?;

        Ok(())
    }

    async fn count_by_ip(&self, ip: &str, since: DateTime<Utc>) -> Result<u64, DomainError> {
        self.count(
            "SELECT COUNT(*) FROM fail_auth_attempts WHERE ip = ? AND created_at >= ?",
            ip,
            since,
            "count fail attempts by ip",
        )
        .await
    }

    async fn count_by_uid(&self, uid: &str, since: DateTime<Utc>) -> Result<u64, DomainError> {
        self.count(
            "SELECT COUNT(*) FROM fail_auth_attempts \
             WHERE uid = ? AND created_at >= ? AND impersonated = FALSE",
            uid,
            since,
            "count fail attempts by uid",
        )
        .await
    }

    async fn delete_all_by_ip(&self, ip: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM fail_auth_attempts WHERE ip = ?")
            .bind(ip)
            .execute(&self.pool)
            .await
            .map_err(storage_error("delete fail attempts by ip"))?;

        Ok(())
    }

    async fn delete_all_old(&self, uid: &str, before: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM fail_auth_attempts WHERE uid = ? OR created_at <= ?")
            .bind(uid)
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(storage_error("delete old fail attempts"))?;

        Ok(())
    }

    async fn impersonate_all_by_uid(&self, uid: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE fail_auth_attempts SET impersonated = TRUE WHERE uid = ?")
            .bind(uid)
            .execute(&self.pool)
            .await
            .map_err(storage_error("impersonate fail attempts"))?;

        Ok(())
    }
}
