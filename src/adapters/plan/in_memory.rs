//! In-memory plan reader for testing and development.
//!
//! Stores the raw tier strings a remote user record would hold, so tests
//! exercise the same lenient-parse path as the production reader.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::PlanTier;
use crate::ports::PlanReader;

/// In-memory plan reader for tests and single-process development.
#[derive(Debug, Default)]
pub struct InMemoryPlanReader {
    plans: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryPlanReader {
    /// Creates an empty reader; every user reads as "no plan".
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stored tier string for a user.
    ///
    /// The value is stored raw; unknown strings will read back as `None`,
    /// exactly as they would from the real user record.
    pub async fn set_plan(&self, user_id: &UserId, raw_tier: impl Into<String>) {
        let mut plans = self.plans.write().await;
        plans.insert(user_id.to_string(), raw_tier.into());
    }

    /// Removes a user's plan record.
    pub async fn clear_plan(&self, user_id: &UserId) {
        let mut plans = self.plans.write().await;
        plans.remove(user_id.as_str());
    }
}

#[async_trait]
impl PlanReader for InMemoryPlanReader {
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<PlanTier>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans
            .get(user_id.as_str())
            .and_then(|raw| PlanTier::parse(raw)))
    }
}
