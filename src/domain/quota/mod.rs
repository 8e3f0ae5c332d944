//! Quota module - Daily usage accounting vocabulary.
//!
//! A usage counter is keyed by (user, UTC day) and compared against the
//! plan's message allowance to produce an allow/deny decision.

mod decision;
mod usage_key;

pub use decision::{QuotaDecision, QuotaStatus, Remaining};
pub use usage_key::UsageKey;
