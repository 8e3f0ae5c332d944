//! Plan module - Subscription tiers and their entitlements.
//!
//! The entitlement table is the single source of truth for what each plan
//! tier may do. It is total (every tier has exactly one entry), defined at
//! process start, and never mutated at runtime; changing it means shipping
//! a new build.

mod entitlements;
mod feature;
mod tier;

pub use entitlements::{has_feature, plan_value, DiscoveryBoost, Entitlements, MessageAllowance, PlatformFee};
pub use feature::{Feature, PlanField, PlanValue};
pub use tier::PlanTier;
