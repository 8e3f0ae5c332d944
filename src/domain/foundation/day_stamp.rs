//! Calendar-day value object with a fixed UTC day boundary.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single UTC calendar day.
///
/// All "today" computations in the quota logic go through this type so the
/// same logical day always produces the same key, regardless of the
/// caller's local clock. The day boundary is midnight UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(NaiveDate);

impl DayStamp {
    /// Returns the current UTC calendar day.
    pub fn today_utc() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Returns the calendar day containing the given instant.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        Self(dt.date_naive())
    }

    /// Creates a DayStamp from year/month/day, if the date exists.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the following calendar day.
    pub fn next(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }
}

impl fmt::Display for DayStamp {
    /// Formats as `YYYY-MM-DD`, the date component of the storage key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
