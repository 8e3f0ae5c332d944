//! GetQuotaStatusHandler - Read-only quota view for the current day.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::Entitlements;
use crate::domain::quota::{QuotaStatus, UsageKey};
use crate::ports::{PlanReader, UsageStore, UsageStoreError};

/// Query for the caller's remaining message budget today.
#[derive(Debug, Clone)]
pub struct GetQuotaStatusQuery {
    pub user: Option<UserId>,
}

/// Handler that reports quota without consuming.
///
/// Follows the same fail-closed ladder as the consume path; the only
/// difference is that the store is read, never written.
pub struct GetQuotaStatusHandler {
    plans: Arc<dyn PlanReader>,
    usage: Arc<dyn UsageStore>,
}

impl GetQuotaStatusHandler {
    pub fn new(plans: Arc<dyn PlanReader>, usage: Arc<dyn UsageStore>) -> Self {
        Self { plans, usage }
    }

    pub async fn handle(&self, query: GetQuotaStatusQuery) -> Result<QuotaStatus, DomainError> {
        let Some(user_id) = query.user else {
            return Ok(QuotaStatus::exhausted());
        };

        let Some(tier) = self.plans.get_tier(&user_id).await? else {
            return Ok(QuotaStatus::exhausted());
        };

        let allowance = Entitlements::for_tier(tier).max_messages_per_day;
        if allowance.is_unlimited() {
            return Ok(QuotaStatus::new(allowance, 0));
        }

        let key = UsageKey::for_today(user_id);
        let used = self.usage.count(&key).await.map_err(store_error)?;

        Ok(QuotaStatus::new(allowance, used))
    }
}

fn store_error(err: UsageStoreError) -> DomainError {
    tracing::warn!(error = %err, "usage store failure during status read");
    DomainError::new(ErrorCode::StoreUnavailable, err.to_string())
}
