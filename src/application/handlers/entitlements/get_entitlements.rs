//! GetEntitlementsHandler - Full entitlement view for the caller's plan.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::{Entitlements, PlanTier};
use crate::ports::PlanReader;

/// Query for the caller's full entitlement record.
#[derive(Debug, Clone)]
pub struct GetEntitlementsQuery {
    pub user: Option<UserId>,
}

/// Result of an entitlements lookup.
///
/// Both fields are `None` for anonymous callers and for users whose stored
/// plan is missing or unrecognized.
#[derive(Debug, Clone, Copy)]
pub struct GetEntitlementsResult {
    pub tier: Option<PlanTier>,
    pub entitlements: Option<Entitlements>,
}

/// Handler resolving a user to their entitlement record.
pub struct GetEntitlementsHandler {
    plans: Arc<dyn PlanReader>,
}

impl GetEntitlementsHandler {
    pub fn new(plans: Arc<dyn PlanReader>) -> Self {
        Self { plans }
    }

    pub async fn handle(
        &self,
        query: GetEntitlementsQuery,
    ) -> Result<GetEntitlementsResult, DomainError> {
        let tier = match query.user {
            Some(user_id) => self.plans.get_tier(&user_id).await?,
            None => None,
        };

        Ok(GetEntitlementsResult {
            tier,
            entitlements: tier.map(|t| *Entitlements::for_tier(t)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::plan::InMemoryPlanReader;
    use crate::domain::plan::MessageAllowance;

    fn test_user_id() -> UserId {
        UserId::new("viewer-123").unwrap()
    }

    #[tokio::test]
    async fn returns_table_record_for_known_plan() {
        let plans = Arc::new(InMemoryPlanReader::new());
        plans.set_plan(&test_user_id(), "basic").await;
        let handler = GetEntitlementsHandler::new(plans);

        let result = handler
            .handle(GetEntitlementsQuery {
                user: Some(test_user_id()),
            })
            .await
            .unwrap();

        assert_eq!(result.tier, Some(PlanTier::Basic));
        let entitlements = result.entitlements.unwrap();
        assert_eq!(
            entitlements.max_messages_per_day,
            MessageAllowance::Limited(50)
        );
        assert!(entitlements.send_images);
        assert!(!entitlements.send_files);
    }

    #[tokio::test]
    async fn anonymous_caller_gets_nothing() {
        let handler = GetEntitlementsHandler::new(Arc::new(InMemoryPlanReader::new()));

        let result = handler
            .handle(GetEntitlementsQuery { user: None })
            .await
            .unwrap();

        assert_eq!(result.tier, None);
        assert!(result.entitlements.is_none());
    }

    #[tokio::test]
    async fn unrecognized_plan_gets_nothing() {
        let plans = Arc::new(InMemoryPlanReader::new());
        plans.set_plan(&test_user_id(), "diamond").await;
        let handler = GetEntitlementsHandler::new(plans);

        let result = handler
            .handle(GetEntitlementsQuery {
                user: Some(test_user_id()),
            })
            .await
            .unwrap();

        assert_eq!(result.tier, None);
        assert!(result.entitlements.is_none());
    }
}
