//! The tier entitlement table and fail-closed lookup helpers.
//!
//! One record per tier, fixed at build time. Lookups take an
//! `Option<PlanTier>` so callers with no authenticated user or no
//! recognized plan flow through the same code path and always land on
//! "no access".

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Feature, PlanField, PlanTier, PlanValue};
use crate::domain::foundation::ValidationError;

/// Daily message ceiling for a plan.
///
/// `Unlimited` is a distinct variant, not a large sentinel value, so
/// comparisons against it cannot overflow and always permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAllowance {
    /// At most this many messages per UTC day. Always positive.
    Limited(u32),
    /// No ceiling; the counter is never consulted.
    Unlimited,
}

impl MessageAllowance {
    /// Returns true if another message is permitted at the given used count.
    pub fn permits(&self, used: u64) -> bool {
        match self {
            MessageAllowance::Unlimited => true,
            MessageAllowance::Limited(ceiling) => used < u64::from(*ceiling),
        }
    }

    /// Returns the finite ceiling, if any.
    pub fn ceiling(&self) -> Option<u32> {
        match self {
            MessageAllowance::Limited(ceiling) => Some(*ceiling),
            MessageAllowance::Unlimited => None,
        }
    }

    /// Returns true if this allowance has no ceiling.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, MessageAllowance::Unlimited)
    }
}

// Wire format: a JSON number, or null for unlimited.
impl Serialize for MessageAllowance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MessageAllowance::Limited(ceiling) => serializer.serialize_some(ceiling),
            MessageAllowance::Unlimited => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for MessageAllowance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<u32>::deserialize(deserializer)? {
            Some(ceiling) => MessageAllowance::Limited(ceiling),
            None => MessageAllowance::Unlimited,
        })
    }
}

/// Platform fee taken from creator earnings, as a ratio in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlatformFee(f64);

impl PlatformFee {
    /// Creates a fee ratio, rejecting values outside [0, 1].
    pub fn new(ratio: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ValidationError::out_of_range("platform_fee", 0.0, 1.0, ratio));
        }
        Ok(Self(ratio))
    }

    /// Returns the fee as a ratio in [0, 1].
    pub fn ratio(&self) -> f64 {
        self.0
    }
}

/// Discovery feed boost granted to a creator's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryBoost {
    None,
    Small,
    Large,
    Maximum,
}

/// Complete entitlement record for one plan tier.
///
/// # Tier Configuration
///
/// | Tier  | Msgs/day  | Files | Images | Exclusive | Priority | HD  | Download | Tip | Monetize | Badge | Fee  | Boost   |
/// |-------|-----------|-------|--------|-----------|----------|-----|----------|-----|----------|-------|------|---------|
/// | Free  | 3         | No    | No     | No        | No       | No  | No       | Yes | No       | No    | 0.30 | None    |
/// | Basic | 50        | No    | Yes    | Yes       | No       | Yes | No       | Yes | No       | No    | 0.25 | Small   |
/// | Pro   | Unlimited | Yes   | Yes    | Yes       | Yes      | Yes | Yes      | Yes | Yes      | No    | 0.20 | Large   |
/// | Elite | Unlimited | Yes   | Yes    | Yes       | Yes      | Yes | Yes      | Yes | Yes      | Yes   | 0.10 | Maximum |
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Entitlements {
    /// The tier this record applies to.
    pub tier: PlanTier,
    /// Daily message ceiling.
    pub max_messages_per_day: MessageAllowance,
    pub send_files: bool,
    pub send_images: bool,
    pub unlock_exclusive_content: bool,
    pub priority_inbox: bool,
    pub hd_streaming: bool,
    pub download_content: bool,
    pub tip_creators: bool,
    pub monetize: bool,
    pub verified_badge: bool,
    /// Platform fee ratio taken from earnings.
    pub platform_fee: PlatformFee,
    /// Discovery feed boost level.
    pub discovery_boost: DiscoveryBoost,
}

static FREE: Entitlements = Entitlements {
    tier: PlanTier::Free,
    max_messages_per_day: MessageAllowance::Limited(3),
    send_files: false,
    send_images: false,
    unlock_exclusive_content: false,
    priority_inbox: false,
    hd_streaming: false,
    download_content: false,
    tip_creators: true,
    monetize: false,
    verified_badge: false,
    platform_fee: PlatformFee(0.30),
    discovery_boost: DiscoveryBoost::None,
};

static BASIC: Entitlements = Entitlements {
    tier: PlanTier::Basic,
    max_messages_per_day: MessageAllowance::Limited(50),
    send_files: false,
    send_images: true,
    unlock_exclusive_content: true,
    priority_inbox: false,
    hd_streaming: true,
    download_content: false,
    tip_creators: true,
    monetize: false,
    verified_badge: false,
    platform_fee: PlatformFee(0.25),
    discovery_boost: DiscoveryBoost::Small,
};

static PRO: Entitlements = Entitlements {
    tier: PlanTier::Pro,
    max_messages_per_day: MessageAllowance::Unlimited,
    send_files: true,
    send_images: true,
    unlock_exclusive_content: true,
    priority_inbox: true,
    hd_streaming: true,
    download_content: true,
    tip_creators: true,
    monetize: true,
    verified_badge: false,
    platform_fee: PlatformFee(0.20),
    discovery_boost: DiscoveryBoost::Large,
};

static ELITE: Entitlements = Entitlements {
    tier: PlanTier::Elite,
    max_messages_per_day: MessageAllowance::Unlimited,
    send_files: true,
    send_images: true,
    unlock_exclusive_content: true,
    priority_inbox: true,
    hd_streaming: true,
    download_content: true,
    tip_creators: true,
    monetize: true,
    verified_badge: true,
    platform_fee: PlatformFee(0.10),
    discovery_boost: DiscoveryBoost::Maximum,
};

impl Entitlements {
    /// Returns the entitlement record for a tier.
    ///
    /// The match is total; there is no fallback path to miss.
    pub fn for_tier(tier: PlanTier) -> &'static Entitlements {
        match tier {
            PlanTier::Free => &FREE,
            PlanTier::Basic => &BASIC,
            PlanTier::Pro => &PRO,
            PlanTier::Elite => &ELITE,
        }
    }

    /// Returns whether a capability flag is set in this record.
    pub fn feature_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::SendFiles => self.send_files,
            Feature::SendImages => self.send_images,
            Feature::UnlockExclusiveContent => self.unlock_exclusive_content,
            Feature::PriorityInbox => self.priority_inbox,
            Feature::HdStreaming => self.hd_streaming,
            Feature::DownloadContent => self.download_content,
            Feature::TipCreators => self.tip_creators,
            Feature::Monetize => self.monetize,
            Feature::VerifiedBadge => self.verified_badge,
        }
    }
}

/// Returns whether the plan grants a capability.
///
/// Missing or unrecognized plan never grants anything.
pub fn has_feature(plan: Option<PlanTier>, feature: Feature) -> bool {
    match plan {
        Some(tier) => Entitlements::for_tier(tier).feature_enabled(feature),
        None => false,
    }
}

/// Returns the exact table value for a field of the plan, or `None` when
/// there is no recognized plan.
///
/// No interpolation, no partial matches, no side effects.
pub fn plan_value(plan: Option<PlanTier>, field: PlanField) -> Option<PlanValue> {
    let entitlements = Entitlements::for_tier(plan?);
    Some(match field {
        PlanField::Capability(feature) => {
            PlanValue::Enabled(entitlements.feature_enabled(feature))
        }
        PlanField::MaxMessagesPerDay => PlanValue::Messages(entitlements.max_messages_per_day),
        PlanField::PlatformFee => PlanValue::Fee(entitlements.platform_fee),
        PlanField::DiscoveryBoost => PlanValue::Boost(entitlements.discovery_boost),
    })
}
