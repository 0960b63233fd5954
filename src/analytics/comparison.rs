//! Week-over-week comparison.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{count_named, percent_of, unique_users};
use crate::domain::{Event, TimeWindow, event_names};

/// The same aggregate over this week and last week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Value over `[now−7d, now]`.
    pub current: i64,
    /// Value over `[now−14d, now−7d)`.
    pub previous: i64,
    /// `current − previous`.
    pub delta: i64,
}

impl Comparison {
    /// Builds a comparison from two already-computed values.
    #[must_use]
    pub const fn new(current: i64, previous: i64) -> Self {
        Self {
            current,
            previous,
            delta: current - previous,
        }
    }
}

/// Splits events into `(this_week, last_week)`; older events are dropped.
#[must_use]
pub fn split_weeks(events: &[Event], now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    let this_week = TimeWindow::this_week(now);
    let last_week = TimeWindow::previous_week(now);
    let mut current = Vec::new();
    let mut previous = Vec::new();
    for event in events {
        if this_week.contains(event.created_at) {
            current.push(event.clone());
        } else if last_week.contains(event.created_at) {
            previous.push(event.clone());
        }
    }
    (current, previous)
}

/// Computes `aggregate` over both weeks and reports the delta.
pub fn week_over_week<F>(events: &[Event], now: DateTime<Utc>, aggregate: F) -> Comparison
where
    F: Fn(&[Event]) -> i64,
{
    let (current, previous) = split_weeks(events, now);
    Comparison::new(aggregate(&current), aggregate(&previous))
}

/// Weekly snapshot used by the summary prompt and the weekly widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeeklyMetrics {
    /// Distinct users with any event.
    pub active_users: usize,
    /// Events of any kind.
    pub total_events: usize,
    /// `tip_viewed` events.
    pub tips_viewed: usize,
    /// `onboarding_started` events.
    pub onboarding_starts: usize,
    /// `onboarding_completed` events.
    pub onboarding_completions: usize,
    /// Completions as a percentage of starts.
    pub completion_rate: u32,
}

impl WeeklyMetrics {
    /// Aggregates one week of events.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let onboarding_starts = count_named(events, event_names::ONBOARDING_STARTED);
        let onboarding_completions = count_named(events, event_names::ONBOARDING_COMPLETED);
        Self {
            active_users: unique_users(events),
            total_events: events.len(),
            tips_viewed: count_named(events, event_names::TIP_VIEWED),
            onboarding_starts,
            onboarding_completions,
            completion_rate: percent_of(onboarding_completions, onboarding_starts),
        }
    }
}

/// This week against last week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    /// Snapshot over `[now−7d, now]`.
    pub this_week: WeeklyMetrics,
    /// Snapshot over `[now−14d, now−7d)`.
    pub last_week: WeeklyMetrics,
    /// Active users compared.
    pub active_users: Comparison,
    /// Event volume compared.
    pub total_events: Comparison,
    /// Tips viewed compared.
    pub tips_viewed: Comparison,
    /// Onboarding completion rate compared.
    pub completion_rate: Comparison,
}

impl WeeklyReport {
    /// Builds the report from events covering at least the last 14 days.
    #[must_use]
    pub fn from_events(events: &[Event], now: DateTime<Utc>) -> Self {
        let (current, previous) = split_weeks(events, now);
        let this_week = WeeklyMetrics::from_events(&current);
        let last_week = WeeklyMetrics::from_events(&previous);
        let compare = |pick: fn(&WeeklyMetrics) -> i64| {
            Comparison::new(pick(&this_week), pick(&last_week))
        };
        Self {
            this_week,
            last_week,
            active_users: compare(|m| m.active_users as i64),
            total_events: compare(|m| m.total_events as i64),
            tips_viewed: compare(|m| m.tips_viewed as i64),
            completion_rate: compare(|m| i64::from(m.completion_rate)),
        }
    }
}
