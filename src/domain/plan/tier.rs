//! Plan tier definitions.
//!
//! Represents the subscription tier levels sold by the platform.

use serde::{Deserialize, Serialize};

/// Subscription plan tier.
///
/// Determines feature access, the daily message ceiling, and the platform
/// fee taken from creator earnings. A user's tier is written only by the
/// payment collaborator on successful purchase; this service reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - tipping only, 3 messages per day.
    Free,

    /// Basic subscription - images, exclusive content, HD playback.
    Basic,

    /// Pro subscription - creator tooling, unlimited messaging.
    Pro,

    /// Elite subscription - everything, lowest platform fee.
    Elite,
}

impl PlanTier {
    /// All tiers, in ascending rank order.
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Free,
        PlanTier::Basic,
        PlanTier::Pro,
        PlanTier::Elite,
    ];

    /// Parses a stored tier string.
    ///
    /// Returns `None` for anything unrecognized. Stored plan values come
    /// from an external collaborator, so an unknown string degrades to
    /// "no plan" rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(PlanTier::Free),
            "basic" => Some(PlanTier::Basic),
            "pro" => Some(PlanTier::Pro),
            "elite" => Some(PlanTier::Elite),
            _ => None,
        }
    }

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Basic => "Basic",
            PlanTier::Pro => "Pro",
            PlanTier::Elite => "Elite",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more features.
    pub fn rank(&self) -> u8 {
        match self {
            PlanTier::Free => 0,
            PlanTier::Basic => 1,
            PlanTier::Pro => 2,
            PlanTier::Elite => 3,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
