//! ConsumeMessageHandler - Check-and-consume against the daily ceiling.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::Entitlements;
use crate::domain::quota::{QuotaDecision, Remaining, UsageKey};
use crate::ports::{ConsumeOutcome, PlanReader, UsageStore, UsageStoreError};

/// Command to consume one message from today's budget.
#[derive(Debug, Clone)]
pub struct ConsumeMessageCommand {
    /// The authenticated caller, if any. Anonymous callers are denied
    /// without touching the store.
    pub user: Option<UserId>,
}

/// Handler for the check-and-consume operation.
///
/// Decision order: authentication, then plan lookup, then the ceiling.
/// Unlimited plans bypass the counter entirely; limited plans go through
/// the store's atomic conditional consume. Any store failure propagates
/// as an error so the caller never treats an unconfirmed action as sent.
pub struct ConsumeMessageHandler {
    plans: Arc<dyn PlanReader>,
    usage: Arc<dyn UsageStore>,
}

impl ConsumeMessageHandler {
    pub fn new(plans: Arc<dyn PlanReader>, usage: Arc<dyn UsageStore>) -> Self {
        Self { plans, usage }
    }

    pub async fn handle(
        &self,
        command: ConsumeMessageCommand,
    ) -> Result<QuotaDecision, DomainError> {
        let Some(user_id) = command.user else {
            tracing::debug!("message denied: unauthenticated caller");
            return Ok(QuotaDecision::denied());
        };

        let Some(tier) = self.plans.get_tier(&user_id).await? else {
            tracing::debug!(user_id = %user_id, "message denied: no recognized plan");
            return Ok(QuotaDecision::denied());
        };

        let allowance = Entitlements::for_tier(tier).max_messages_per_day;
        let Some(ceiling) = allowance.ceiling() else {
            return Ok(QuotaDecision::allowed(Remaining::Unlimited));
        };

        let key = UsageKey::for_today(user_id);
        let outcome = self
            .usage
            .try_consume(&key, ceiling)
            .await
            .map_err(store_error)?;

        match outcome {
            ConsumeOutcome::Consumed { new_count } => Ok(QuotaDecision::allowed(
                Remaining::after_consume(ceiling, new_count),
            )),
            ConsumeOutcome::LimitReached { count } => {
                tracing::debug!(
                    user_id = %key.user_id(),
                    count,
                    ceiling,
                    "message denied: daily ceiling reached"
                );
                Ok(QuotaDecision::denied())
            }
        }
    }
}

fn store_error(err: UsageStoreError) -> DomainError {
    tracing::warn!(error = %err, "usage store failure during consume");
    DomainError::new(ErrorCode::StoreUnavailable, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::plan::InMemoryPlanReader;
    use crate::adapters::usage::InMemoryUsageStore;
    use crate::domain::plan::PlanTier;
    use async_trait::async_trait;

    // ════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════

    struct FailingUsageStore;

    #[async_trait]
    impl UsageStore for FailingUsageStore {
        async fn count(&self, _key: &UsageKey) -> Result<u64, UsageStoreError> {
            Err(UsageStoreError::Unavailable("simulated outage".into()))
        }

        async fn try_consume(
            &self,
            _key: &UsageKey,
            _ceiling: u32,
        ) -> Result<ConsumeOutcome, UsageStoreError> {
            Err(UsageStoreError::Unavailable("simulated outage".into()))
        }
    }

    struct FailingPlanReader;

    #[async_trait]
    impl PlanReader for FailingPlanReader {
        async fn get_tier(&self, _user_id: &UserId) -> Result<Option<PlanTier>, DomainError> {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "simulated read failure",
            ))
        }
    }

    // ════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════

    fn test_user_id() -> UserId {
        UserId::new("viewer-123").unwrap()
    }

    async fn handler_with_plan(raw_tier: &str) -> (ConsumeMessageHandler, Arc<InMemoryUsageStore>) {
        let plans = Arc::new(InMemoryPlanReader::new());
        plans.set_plan(&test_user_id(), raw_tier).await;
        let usage = Arc::new(InMemoryUsageStore::new());
        (
            ConsumeMessageHandler::new(plans, usage.clone()),
            usage,
        )
    }

    fn command() -> ConsumeMessageCommand {
        ConsumeMessageCommand {
            user: Some(test_user_id()),
        }
    }

    // ════════════════════════════════════════════════════════════════
    // Limited Plans
    // ════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn free_tier_counts_down_then_denies() {
        let (handler, _) = handler_with_plan("free").await;

        for expected_remaining in [2u32, 1, 0] {
            let decision = handler.handle(command()).await.unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.remaining, Remaining::Count(expected_remaining));
        }

        let decision = handler.handle(command()).await.unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, Remaining::Count(0));
    }

    #[tokio::test]
    async fn denied_consume_does_not_advance_counter() {
        let (handler, usage) = handler_with_plan("free").await;

        for _ in 0..5 {
            handler.handle(command()).await.unwrap();
        }

        let key = UsageKey::for_today(test_user_id());
        assert_eq!(usage.count(&key).await.unwrap(), 3);
    }

    // ════════════════════════════════════════════════════════════════
    // Unlimited Plans
    // ════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn pro_tier_is_always_allowed_with_unlimited_remaining() {
        let (handler, _) = handler_with_plan("pro").await;

        for _ in 0..10 {
            let decision = handler.handle(command()).await.unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.remaining, Remaining::Unlimited);
        }
    }

    #[tokio::test]
    async fn unlimited_plan_never_touches_the_store() {
        let (handler, usage) = handler_with_plan("elite").await;

        for _ in 0..10 {
            handler.handle(command()).await.unwrap();
        }

        assert_eq!(usage.document_count().await, 0);
    }

    // ════════════════════════════════════════════════════════════════
    // Fail-Closed Paths
    // ════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn anonymous_caller_is_denied_without_store_access() {
        let plans = Arc::new(InMemoryPlanReader::new());
        let usage = Arc::new(InMemoryUsageStore::new());
        let handler = ConsumeMessageHandler::new(plans, usage.clone());

        let decision = handler
            .handle(ConsumeMessageCommand { user: None })
            .await
            .unwrap();

        assert!(!decision.allowed);
        assert_eq!(decision.remaining, Remaining::Count(0));
        assert_eq!(usage.document_count().await, 0);
    }

    #[tokio::test]
    async fn user_without_plan_is_denied() {
        let plans = Arc::new(InMemoryPlanReader::new());
        let usage = Arc::new(InMemoryUsageStore::new());
        let handler = ConsumeMessageHandler::new(plans, usage);

        let decision = handler.handle(command()).await.unwrap();
        assert!(!decision.allowed);
    }

    #[tokio::test]
    async fn unrecognized_plan_string_is_denied() {
        let (handler, usage) = handler_with_plan("platinum").await;

        let decision = handler.handle(command()).await.unwrap();
        assert!(!decision.allowed);
        assert_eq!(usage.document_count().await, 0);
    }

    #[tokio::test]
    async fn store_failure_propagates_as_error() {
        let plans = Arc::new(InMemoryPlanReader::new());
        plans.set_plan(&test_user_id(), "free").await;
        let handler = ConsumeMessageHandler::new(plans, Arc::new(FailingUsageStore));

        let result = handler.handle(command()).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::StoreUnavailable);
    }

    #[tokio::test]
    async fn plan_lookup_failure_propagates_as_error() {
        let usage = Arc::new(InMemoryUsageStore::new());
        let handler = ConsumeMessageHandler::new(Arc::new(FailingPlanReader), usage);

        let result = handler.handle(command()).await;
        assert!(result.is_err());
    }
}
