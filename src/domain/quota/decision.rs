//! Allow/deny decision types for quota checks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::plan::MessageAllowance;

/// Messages left in the current UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    /// This many more messages today.
    Count(u32),
    /// No ceiling applies.
    Unlimited,
}

impl Remaining {
    /// Remaining budget after an accepted consume against a ceiling.
    pub fn after_consume(ceiling: u32, new_count: u64) -> Self {
        let used = u32::try_from(new_count).unwrap_or(u32::MAX);
        Remaining::Count(ceiling.saturating_sub(used))
    }

    /// Remaining budget for an allowance at the given used count.
    pub fn from_allowance(allowance: MessageAllowance, used: u64) -> Self {
        match allowance.ceiling() {
            None => Remaining::Unlimited,
            Some(ceiling) => {
                let used = u32::try_from(used).unwrap_or(u32::MAX);
                Remaining::Count(ceiling.saturating_sub(used))
            }
        }
    }
}

// Wire format: a JSON number, or null for unlimited.
impl Serialize for Remaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Remaining::Count(n) => serializer.serialize_some(n),
            Remaining::Unlimited => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Remaining {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<u32>::deserialize(deserializer)? {
            Some(n) => Remaining::Count(n),
            None => Remaining::Unlimited,
        })
    }
}

/// Outcome of a check-and-consume call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDecision {
    /// Whether the action may proceed.
    pub allowed: bool,
    /// Budget left after this decision. Zero on every denial.
    pub remaining: Remaining,
}

impl QuotaDecision {
    /// An allowed decision with the given remaining budget.
    pub fn allowed(remaining: Remaining) -> Self {
        Self {
            allowed: true,
            remaining,
        }
    }

    /// A denial. Remaining is always reported as zero.
    pub fn denied() -> Self {
        Self {
            allowed: false,
            remaining: Remaining::Count(0),
        }
    }
}

/// Read-only view of a user's quota for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuotaStatus {
    /// The plan's daily ceiling.
    pub ceiling: MessageAllowance,
    /// Messages consumed so far today.
    pub used: u64,
    /// Messages left today.
    pub remaining: Remaining,
}

impl QuotaStatus {
    /// Builds a status view from an allowance and a used count.
    pub fn new(ceiling: MessageAllowance, used: u64) -> Self {
        Self {
            ceiling,
            used,
            remaining: Remaining::from_allowance(ceiling, used),
        }
    }

    /// Status for a caller with no recognized plan: nothing available.
    pub fn exhausted() -> Self {
        Self {
            ceiling: MessageAllowance::Limited(0),
            used: 0,
            remaining: Remaining::Count(0),
        }
    }
}
