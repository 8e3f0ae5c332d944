//! PostgreSQL implementation of PlanReader.
//!
//! Reads the `user_plans` table written by the payment collaborator on
//! successful subscription purchase. This adapter never writes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::PlanTier;
use crate::ports::PlanReader;

/// PostgreSQL implementation of the PlanReader port.
pub struct PostgresPlanReader {
    pool: PgPool,
}

impl PostgresPlanReader {
    /// Creates a new PostgresPlanReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanReader for PostgresPlanReader {
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<PlanTier>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT tier
            FROM user_plans
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get plan: {}", e))
        })?;

        let Some((raw_tier,)) = row else {
            return Ok(None);
        };

        // An unknown stored value degrades to "no plan"; it must not grant
        // access and must not fail the request.
        let tier = PlanTier::parse(&raw_tier);
        if tier.is_none() {
            tracing::warn!(user_id = %user_id, tier = %raw_tier, "unrecognized plan tier in user record");
        }

        Ok(tier)
    }
}
