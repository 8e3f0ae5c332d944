//! PlanReader port - Lookup of a user's subscription tier.
//!
//! The plan tier lives in a user record owned by the payment collaborator;
//! this service only ever reads it. A stored value that does not parse as
//! a known tier is reported as `None`, the same as no record at all, so
//! downstream checks stay fail-closed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::PlanTier;

/// Port for reading a user's current plan tier.
///
/// Implementations may cache; a plan change only takes effect on the next
/// read, which is acceptable because tier changes are rare and externally
/// driven.
#[async_trait]
pub trait PlanReader: Send + Sync {
    /// Returns the user's tier, or `None` when the user has no recognized
    /// plan.
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<PlanTier>, DomainError>;
}
