//! PostgreSQL implementation of UsageStore.
//!
//! One row per (user, day) in `daily_usage`. The conditional consume is a
//! single upsert with a `WHERE count < ceiling` guard, so the check and
//! the increment are one atomic statement and a denial never writes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::quota::UsageKey;
use crate::ports::{ConsumeOutcome, UsageStore, UsageStoreError};

/// PostgreSQL implementation of the UsageStore port.
pub struct PostgresUsageStore {
    pool: PgPool,
}

impl PostgresUsageStore {
    /// Creates a new PostgresUsageStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageStore for PostgresUsageStore {
    async fn count(&self, key: &UsageKey) -> Result<u64, UsageStoreError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT count
            FROM daily_usage
            WHERE usage_key = $1
            "#,
        )
        .bind(key.storage_key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UsageStoreError::Unavailable(e.to_string()))?;

        Ok(row.map_or(0, |(count,)| count.max(0) as u64))
    }

    async fn try_consume(
        &self,
        key: &UsageKey,
        ceiling: u32,
    ) -> Result<ConsumeOutcome, UsageStoreError> {
        // The insert arm writes count = 1, which is only valid when the
        // ceiling admits at least one message.
        if ceiling == 0 {
            let count = self.count(key).await?;
            return Ok(ConsumeOutcome::LimitReached { count });
        }

        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO daily_usage (usage_key, user_id, day, count, updated_at)
            VALUES ($1, $2, $3, 1, NOW())
            ON CONFLICT (usage_key)
            DO UPDATE SET count = daily_usage.count + 1, updated_at = NOW()
            WHERE daily_usage.count < $4
            RETURNING count
            "#,
        )
        .bind(key.storage_key())
        .bind(key.user_id().as_str())
        .bind(key.day().to_string())
        .bind(i64::from(ceiling))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UsageStoreError::Unavailable(e.to_string()))?;

        match row {
            Some((new_count,)) => Ok(ConsumeOutcome::Consumed {
                new_count: new_count.max(0) as u64,
            }),
            None => {
                let count = self.count(key).await?;
                Ok(ConsumeOutcome::LimitReached { count })
            }
        }
    }
}

impl std::fmt::Debug for PostgresUsageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresUsageStore").finish_non_exhaustive()
    }
}
