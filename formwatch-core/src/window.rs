//! Check-window calculation
//!
//! The lower bound for "new since last run" is `now - lookback`, truncated
//! to day granularity. The store may hold date-only values, so a sub-day
//! bound would silently exclude rows stored without a time component.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Inclusive lower time bound used to select new rows for one run.
///
/// Ephemeral: computed fresh each run from the current time and the
/// configured lookback, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckWindow {
    since: NaiveDate,
}

impl CheckWindow {
    /// Compute the window lower bound from the current time and a lookback
    /// in hours. Pure function of its inputs; no error conditions.
    pub fn compute(now: DateTime<Utc>, lookback_hours: u64) -> Self {
        let bound = now - Duration::hours(lookback_hours as i64);
        CheckWindow {
            since: bound.date_naive(),
        }
    }

    /// The day-granular lower bound.
    pub fn since(&self) -> NaiveDate {
        self.since
    }

    /// The bound as `YYYY-MM-DD`, the form used both for the query
    /// parameter and for status output.
    pub fn sql_bound(&self) -> String {
        self.since.format("%Y-%m-%d").to_string()
    }
}
