//! MySQL implementation of the BlockedIpRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use wu_core::domain::entities::login_security::BlockedIp;
use wu_core::errors::DomainError;
use wu_core::repositories::BlockedIpRepository;

use super::{column_error, parse_uuid, storage_error};

/// MySQL implementation of BlockedIpRepository
pub struct MySqlBlockedIpRepository {
    pool: MySqlPool,
}

impl MySqlBlockedIpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockedIpRepository for MySqlBlockedIpRepository {
    async fn find_by_ip(&self, ip: &str) -> Result<Option<BlockedIp>, DomainError> {
        let row = sqlx::query(
            "SELECT id, ip, created_at, blocked_until FROM blocked_ips \
             WHERE ip = ? ORDER BY blocked_until DESC LIMIT 1",
        )
        .bind(ip)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("find blocked ip"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        Ok(Some(BlockedIp {
            id: parse_uuid("id", &id)?,
            ip: row.try_get("ip").map_err(|e| column_error("ip", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            blocked_until: row
                .try_get::<DateTime<Utc>, _>("blocked_until")
                .map_err(|e| column_error("blocked_until", e))?,
        }))
    }

    async fn create(
        &self,
        ip: &str,
        blocked_until: DateTime<Utc>,
    ) -> Result<BlockedIp, DomainError> {
        let record = BlockedIp::new(ip, blocked_until);

        sqlx::query(
            "INSERT INTO blocked_ips (id, ip, created_at, blocked_until) VALUES (?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.ip)
        .bind(record.created_at)
        .bind(record.blocked_until)
        .execute(&self.pool)
        .await
        .map_err(storage_error("save blocked ip"))?;

        Ok(record)
    }

    async fn delete(&self, blocked_ip: &BlockedIp) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM blocked_ips WHERE id = ?")
            .bind(blocked_ip.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_error("delete blocked ip"))?;

        Ok(())
    }
}
