//! Composite key addressing one user's counter for one day.

use std::fmt;

use crate::domain::foundation::{DayStamp, UserId};

/// Key for a per-user, per-day usage counter document.
///
/// The persisted form is `"<userId>_<YYYY-MM-DD>"`. Day rollover is
/// handled by construction: a new day yields a new key, and the previous
/// day's document is simply never addressed again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsageKey {
    user_id: UserId,
    day: DayStamp,
}

impl UsageKey {
    /// Creates a key for an explicit day.
    pub fn new(user_id: UserId, day: DayStamp) -> Self {
        Self { user_id, day }
    }

    /// Creates a key for the current UTC day.
    ///
    /// This is the only place "today" enters the quota logic, so every
    /// check within the same logical day addresses the same document.
    pub fn for_today(user_id: UserId) -> Self {
        Self::new(user_id, DayStamp::today_utc())
    }

    /// The user this counter belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The UTC day this counter covers.
    pub fn day(&self) -> DayStamp {
        self.day
    }

    /// Returns the composite storage key string.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.user_id, self.day)
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}
