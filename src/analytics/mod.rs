//! Pure aggregation functions over analytics events.
//!
//! Every function here takes a slice of [`Event`]s (and, where a window
//! matters, an explicit `now`) and returns plain numbers or small maps. No
//! function fails: an empty slice, which is what a failed fetch degrades
//! to, always produces all-zero metrics.
//!
//! ```text
//! EventStore ──fetch──▶ Vec<Event> ──analytics::*──▶ metrics ──report::*──▶ JSON
//! ```

pub mod comparison;
pub mod daily;
pub mod funnel;
pub mod headline;
pub mod retention;
pub mod streaks;

use std::collections::{BTreeMap, HashSet};

pub use comparison::{Comparison, WeeklyMetrics, WeeklyReport, split_weeks, week_over_week};
pub use daily::{DailyEngagement, daily_active_users, engagement_series};
pub use funnel::{
    Funnel, FunnelBaseline, FunnelStage, FunnelStep, ONBOARDING_SCREENS, build_funnel,
    screen_counts, screen_users,
};
pub use headline::{HeadlineMetric, HeadlineMetrics, MetricKey};
pub use retention::{RetentionReport, onboarding_rate, retention, retention_rate};
pub use streaks::{
    StreakBucket, StreakBucketCount, StreakDistribution, average_streak, latest_streaks,
};

use crate::domain::Event;

/// Number of distinct non-empty user IDs.
#[must_use]
pub fn unique_users(events: &[Event]) -> usize {
    events
        .iter()
        .filter_map(Event::user)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of events with the given name.
#[must_use]
pub fn count_named(events: &[Event], name: &str) -> usize {
    events.iter().filter(|e| e.is(name)).count()
}

/// Event count per event name, ordered by name.
#[must_use]
pub fn event_breakdown(events: &[Event]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.event_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// `round(numerator / denominator × 100)`, or 0 when the denominator is 0.
#[must_use]
pub fn percent_of(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((numerator as f64 / denominator as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event_names;
    use crate::test_support::{day, event};

    #[test]
    fn unique_users_ignores_missing_ids() {
        let events = vec![
            event(event_names::APP_OPENED, Some("u1"), day(1)),
            event(event_names::APP_OPENED, Some("u1"), day(2)),
            event(event_names::APP_OPENED, None, day(2)),
            event(event_names::TIP_VIEWED, Some("u2"), day(2)),
        ];
        assert_eq!(unique_users(&events), 2);
    }

    #[test]
    fn percent_of_rounds_half_up() {
        assert_eq!(percent_of(1, 2), 50);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(1, 8), 13);
    }

    #[test]
    fn percent_of_zero_denominator_is_zero() {
        assert_eq!(percent_of(5, 0), 0);
    }

    #[test]
    fn breakdown_counts_every_name() {
        let events = vec![
            event(event_names::TIP_VIEWED, Some("u1"), day(1)),
            event(event_names::TIP_VIEWED, None, day(1)),
            event(event_names::APP_OPENED, Some("u1"), day(1)),
        ];
        let counts = event_breakdown(&events);
        assert_eq!(counts.get(event_names::TIP_VIEWED), Some(&2));
        assert_eq!(counts.get(event_names::APP_OPENED), Some(&1));
    }
}
