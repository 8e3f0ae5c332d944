//! UsageStore port - Remote store for daily usage counters.
//!
//! One document per (user, UTC day), holding a count that only ever grows.
//! The consume operation is conditional and atomic at the storage layer:
//! a denied consume must leave the stored count untouched, and concurrent
//! consumes from multiple sessions must not lose updates.

use async_trait::async_trait;

use crate::domain::quota::UsageKey;

/// Result of a conditional consume against a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The count was incremented. `new_count` is the value after the
    /// increment, so the first consume of a day reports 1.
    Consumed { new_count: u64 },
    /// The count was already at or over the ceiling; nothing changed.
    LimitReached { count: u64 },
}

impl ConsumeOutcome {
    /// Returns true if the consume was accepted.
    pub fn is_consumed(&self) -> bool {
        matches!(self, ConsumeOutcome::Consumed { .. })
    }
}

/// Port for the remote daily-counter store.
///
/// Counters are created lazily on the first accepted consume of a day and
/// are never decremented or deleted here; a new day simply addresses a new
/// key. Retention of superseded documents is an external concern.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Returns the current count for a key. A missing document reads as 0.
    async fn count(&self, key: &UsageKey) -> Result<u64, UsageStoreError>;

    /// Atomically increments the counter if it is below `ceiling`.
    ///
    /// The check and the increment are one storage-layer operation, so a
    /// burst of concurrent calls never pushes the count past the ceiling
    /// and a denied call never increments.
    async fn try_consume(
        &self,
        key: &UsageKey,
        ceiling: u32,
    ) -> Result<ConsumeOutcome, UsageStoreError>;
}

/// Errors from the usage store.
///
/// Callers must treat any of these as "action not confirmed" and deny;
/// assuming success on a failed increment would let a user exceed quota.
#[derive(Debug, thiserror::Error)]
pub enum UsageStoreError {
    /// The backing store could not be reached or the call failed.
    #[error("usage store unavailable: {0}")]
    Unavailable(String),

    /// The stored document did not have the expected shape.
    #[error("corrupt usage record for key '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },
}
