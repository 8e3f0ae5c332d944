//! CheckFeatureHandler - Single capability lookup for a caller.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::{has_feature, Feature};
use crate::ports::PlanReader;

/// Query asking whether the caller's plan grants one capability.
///
/// `feature` is `None` when the requested name did not parse; that path
/// answers `false` like every other unknown input.
#[derive(Debug, Clone)]
pub struct CheckFeatureQuery {
    pub user: Option<UserId>,
    pub feature: Option<Feature>,
}

/// Result of a capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckFeatureResult {
    pub enabled: bool,
}

/// Handler for single-capability checks.
pub struct CheckFeatureHandler {
    plans: Arc<dyn PlanReader>,
}

impl CheckFeatureHandler {
    pub fn new(plans: Arc<dyn PlanReader>) -> Self {
        Self { plans }
    }

    pub async fn handle(
        &self,
        query: CheckFeatureQuery,
    ) -> Result<CheckFeatureResult, DomainError> {
        let Some(feature) = query.feature else {
            return Ok(CheckFeatureResult { enabled: false });
        };

        let tier = match query.user {
            Some(user_id) => self.plans.get_tier(&user_id).await?,
            None => None,
        };

        Ok(CheckFeatureResult {
            enabled: has_feature(tier, feature),
        })
    }
}
