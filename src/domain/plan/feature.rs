//! Lookup vocabulary for entitlement fields.

use serde::{Deserialize, Serialize};

use super::{DiscoveryBoost, MessageAllowance, PlatformFee};

/// Boolean capability flags granted by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SendFiles,
    SendImages,
    UnlockExclusiveContent,
    PriorityInbox,
    HdStreaming,
    DownloadContent,
    TipCreators,
    Monetize,
    VerifiedBadge,
}

impl Feature {
    /// All capability flags.
    pub const ALL: [Feature; 9] = [
        Feature::SendFiles,
        Feature::SendImages,
        Feature::UnlockExclusiveContent,
        Feature::PriorityInbox,
        Feature::HdStreaming,
        Feature::DownloadContent,
        Feature::TipCreators,
        Feature::Monetize,
        Feature::VerifiedBadge,
    ];

    /// Parses a snake_case feature name.
    ///
    /// Returns `None` for anything unrecognized; an unknown feature name
    /// never grants access.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "send_files" => Some(Feature::SendFiles),
            "send_images" => Some(Feature::SendImages),
            "unlock_exclusive_content" => Some(Feature::UnlockExclusiveContent),
            "priority_inbox" => Some(Feature::PriorityInbox),
            "hd_streaming" => Some(Feature::HdStreaming),
            "download_content" => Some(Feature::DownloadContent),
            "tip_creators" => Some(Feature::TipCreators),
            "monetize" => Some(Feature::Monetize),
            "verified_badge" => Some(Feature::VerifiedBadge),
            _ => None,
        }
    }

    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::SendFiles => "send_files",
            Feature::SendImages => "send_images",
            Feature::UnlockExclusiveContent => "unlock_exclusive_content",
            Feature::PriorityInbox => "priority_inbox",
            Feature::HdStreaming => "hd_streaming",
            Feature::DownloadContent => "download_content",
            Feature::TipCreators => "tip_creators",
            Feature::Monetize => "monetize",
            Feature::VerifiedBadge => "verified_badge",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Any addressable field of an entitlement record.
///
/// Covers the capability flags plus the non-boolean fields, so a single
/// lookup can answer "what does this plan say for X" uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanField {
    Capability(Feature),
    MaxMessagesPerDay,
    PlatformFee,
    DiscoveryBoost,
}

impl PlanField {
    /// Every addressable field, for table-totality checks.
    pub fn all() -> Vec<PlanField> {
        let mut fields: Vec<PlanField> =
            Feature::ALL.iter().copied().map(PlanField::Capability).collect();
        fields.push(PlanField::MaxMessagesPerDay);
        fields.push(PlanField::PlatformFee);
        fields.push(PlanField::DiscoveryBoost);
        fields
    }
}

/// The value of a single entitlement field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanValue {
    Enabled(bool),
    Messages(MessageAllowance),
    Fee(PlatformFee),
    Boost(DiscoveryBoost),
}
