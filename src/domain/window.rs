//! Time windows over `created_at`.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;

/// Half-open interval `[start, end)` over event timestamps.
///
/// A window without `end` extends to the present; the store never holds
/// rows from the future, so `[start, now]` and `[start, ∞)` select the same
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound.
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// Everything since `start`.
    #[must_use]
    pub const fn since(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    /// `[start, end)`.
    #[must_use]
    pub const fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// The trailing `days` days ending at `now`.
    #[must_use]
    pub fn last_days(now: DateTime<Utc>, days: i64) -> Self {
        Self::since(now - Duration::days(days))
    }

    /// Since UTC midnight of `now`'s date.
    #[must_use]
    pub fn today(now: DateTime<Utc>) -> Self {
        Self::since(now.date_naive().and_time(NaiveTime::MIN).and_utc())
    }

    /// The seven days ending at `now`.
    #[must_use]
    pub fn this_week(now: DateTime<Utc>) -> Self {
        Self::last_days(now, 7)
    }

    /// The seven days before [`TimeWindow::this_week`].
    #[must_use]
    pub fn previous_week(now: DateTime<Utc>) -> Self {
        Self::between(now - Duration::days(14), now - Duration::days(7))
    }

    /// Returns `true` if `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && self.end.is_none_or(|end| at < end)
    }
}
