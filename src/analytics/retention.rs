//! Retention and onboarding conversion rates.

use serde::Serialize;

use super::{count_named, percent_of};
use crate::domain::{Event, event_names};

/// `round(returns / cohort × 100)`, 0 for an empty cohort.
#[must_use]
pub fn retention_rate(returns: usize, cohort: usize) -> u32 {
    percent_of(returns, cohort)
}

/// Day-N return rates relative to completed onboardings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetentionReport {
    /// `onboarding_completed` events (the cohort size).
    pub cohort: usize,
    /// Percent returning after one day.
    pub day_1: u32,
    /// Percent returning after seven days.
    pub day_7: u32,
    /// Percent returning after thirty days.
    pub day_30: u32,
}

impl RetentionReport {
    /// `(label, rate)` pairs in day order.
    #[must_use]
    pub fn points(&self) -> [(&'static str, u32); 3] {
        [
            ("Day 1", self.day_1),
            ("Day 7", self.day_7),
            ("Day 30", self.day_30),
        ]
    }
}

/// Computes each day-N rate independently from the same event list.
#[must_use]
pub fn retention(events: &[Event]) -> RetentionReport {
    let cohort = count_named(events, event_names::ONBOARDING_COMPLETED);
    let rate = |name| retention_rate(count_named(events, name), cohort);
    RetentionReport {
        cohort,
        day_1: rate(event_names::DAY_1_RETURN),
        day_7: rate(event_names::DAY_7_RETURN),
        day_30: rate(event_names::DAY_30_RETURN),
    }
}

/// Completed onboardings as a percentage of started ones.
#[must_use]
pub fn onboarding_rate(events: &[Event]) -> u32 {
    percent_of(
        count_named(events, event_names::ONBOARDING_COMPLETED),
        count_named(events, event_names::ONBOARDING_STARTED),
    )
}
