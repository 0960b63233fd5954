//! Per-day bucketing: daily active users and the engagement series.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Event, event_names};

/// Unique users per UTC calendar day, ordered by date.
///
/// Days without any identified user do not appear.
#[must_use]
pub fn daily_active_users(events: &[Event]) -> BTreeMap<NaiveDate, usize> {
    let mut buckets: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    for event in events {
        if let Some(user) = event.user() {
            buckets.entry(event.day()).or_default().insert(user);
        }
    }
    buckets
        .into_iter()
        .map(|(date, users)| (date, users.len()))
        .collect()
}

/// One point of the daily engagement chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEngagement {
    /// UTC calendar day.
    pub date: NaiveDate,
    /// Distinct users with any event that day.
    pub active_users: usize,
    /// `tip_viewed` events that day.
    pub tips_viewed: usize,
    /// `checklist_item_completed` events that day.
    pub checklist_completions: usize,
}

/// Builds the daily engagement series, ordered by date ascending.
///
/// Every day with at least one event gets a point, even when none of its
/// events carry a user ID.
#[must_use]
pub fn engagement_series(events: &[Event]) -> Vec<DailyEngagement> {
    #[derive(Default)]
    struct Bucket<'a> {
        users: HashSet<&'a str>,
        tips: usize,
        checklists: usize,
    }

    let mut buckets: BTreeMap<NaiveDate, Bucket<'_>> = BTreeMap::new();
    for event in events {
        let bucket = buckets.entry(event.day()).or_default();
        if let Some(user) = event.user() {
            bucket.users.insert(user);
        }
        if event.is(event_names::TIP_VIEWED) {
            bucket.tips += 1;
        } else if event.is(event_names::CHECKLIST_ITEM_COMPLETED) {
            bucket.checklists += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(date, bucket)| DailyEngagement {
            date,
            active_users: bucket.users.len(),
            tips_viewed: bucket.tips,
            checklist_completions: bucket.checklists,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::analytics::unique_users;
    use crate::test_support::{day, event};

    #[test]
    fn disjoint_users_sum_to_range_total() {
        let events = vec![
            event(event_names::APP_OPENED, Some("u1"), day(1)),
            event(event_names::APP_OPENED, Some("u2"), day(1)),
            event(event_names::APP_OPENED, Some("u3"), day(2)),
        ];
        let per_day: usize = daily_active_users(&events).values().sum();
        assert_eq!(per_day, unique_users(&events));
    }

    #[test]
    fn returning_users_are_counted_once_per_day() {
        let events = vec![
            event(event_names::APP_OPENED, Some("u1"), day(1)),
            event(event_names::TIP_VIEWED, Some("u1"), day(1)),
            event(event_names::APP_OPENED, Some("u1"), day(2)),
            event(event_names::APP_OPENED, Some("u2"), day(2)),
        ];
        let per_day = daily_active_users(&events);
        assert_eq!(per_day.get(&day(1).date_naive()), Some(&1));
        assert_eq!(per_day.get(&day(2).date_naive()), Some(&2));

        let total: usize = per_day.values().sum();
        assert!(total > unique_users(&events));
    }

    #[test]
    fn engagement_series_is_sorted_and_counts_by_name() {
        let events = vec![
            event(event_names::TIP_VIEWED, Some("u1"), day(3)),
            event(event_names::CHECKLIST_ITEM_COMPLETED, Some("u2"), day(3)),
            event(event_names::APP_OPENED, None, day(1)),
            event(event_names::TIP_VIEWED, Some("u1"), day(3)),
        ];
        let series = engagement_series(&events);
        assert_eq!(series.len(), 2);

        let Some(first) = series.first() else {
            panic!("expected a first point");
        };
        assert_eq!(first.date, day(1).date_naive());
        assert_eq!(first.active_users, 0);

        let Some(last) = series.last() else {
            panic!("expected a last point");
        };
        assert_eq!(last.active_users, 2);
        assert_eq!(last.tips_viewed, 2);
        assert_eq!(last.checklist_completions, 1);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        assert!(engagement_series(&[]).is_empty());
        assert!(daily_active_users(&[]).is_empty());
    }
}
