//! Request/response DTOs for the quota and entitlement endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::entitlements::GetEntitlementsResult;
use crate::domain::plan::{Entitlements, PlanTier};
use crate::domain::quota::{QuotaDecision, QuotaStatus, Remaining};

/// Standard error envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// GET /api/entitlements response.
///
/// `tier` and `entitlements` are both null for callers without a
/// recognized plan.
#[derive(Debug, Serialize)]
pub struct EntitlementsResponse {
    pub tier: Option<PlanTier>,
    pub entitlements: Option<Entitlements>,
}

impl From<GetEntitlementsResult> for EntitlementsResponse {
    fn from(result: GetEntitlementsResult) -> Self {
        Self {
            tier: result.tier,
            entitlements: result.entitlements,
        }
    }
}

/// GET /api/entitlements/features/{feature} response.
#[derive(Debug, Serialize)]
pub struct FeatureCheckResponse {
    pub feature: String,
    pub enabled: bool,
}

/// POST /api/quota/messages response.
///
/// `remaining` is a number, or null when the plan is unlimited.
#[derive(Debug, Serialize)]
pub struct ConsumeMessageResponse {
    pub allowed: bool,
    pub remaining: Remaining,
}

impl From<QuotaDecision> for ConsumeMessageResponse {
    fn from(decision: QuotaDecision) -> Self {
        Self {
            allowed: decision.allowed,
            remaining: decision.remaining,
        }
    }
}

/// GET /api/quota/messages response.
#[derive(Debug, Serialize)]
pub struct QuotaStatusResponse {
    pub ceiling: Option<u32>,
    pub used: u64,
    pub remaining: Remaining,
}

impl From<QuotaStatus> for QuotaStatusResponse {
    fn from(status: QuotaStatus) -> Self {
        Self {
            ceiling: status.ceiling.ceiling(),
            used: status.used,
            remaining: status.remaining,
        }
    }
}

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
