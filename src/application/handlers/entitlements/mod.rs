//! Entitlement handlers - plan capability and value lookups.

mod check_feature;
mod get_entitlements;

pub use check_feature::{CheckFeatureHandler, CheckFeatureQuery, CheckFeatureResult};
pub use get_entitlements::{GetEntitlementsHandler, GetEntitlementsQuery, GetEntitlementsResult};
