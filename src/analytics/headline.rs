//! Headline metric cards shown across the top of the dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{count_named, onboarding_rate, streaks::average_streak, unique_users};
use crate::domain::{Event, TimeWindow, event_names};

/// Identifies one headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Distinct users since UTC midnight.
    ActiveUsers,
    /// Onboardings started since UTC midnight.
    NewUsers,
    /// Onboarding completion percentage over 30 days.
    OnboardingRate,
    /// Tips opened since UTC midnight.
    TipsViewed,
    /// Mean positive streak over 30 days.
    AvgStreak,
}

impl MetricKey {
    /// All metrics in card order.
    pub const ALL: [Self; 5] = [
        Self::ActiveUsers,
        Self::NewUsers,
        Self::OnboardingRate,
        Self::TipsViewed,
        Self::AvgStreak,
    ];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActiveUsers => "active_users",
            Self::NewUsers => "new_users",
            Self::OnboardingRate => "onboarding_rate",
            Self::TipsViewed => "tips_viewed",
            Self::AvgStreak => "avg_streak",
        }
    }

    /// Card title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ActiveUsers => "Users Today",
            Self::NewUsers => "New Signups",
            Self::OnboardingRate => "Onboarding %",
            Self::TipsViewed => "Tips Viewed",
            Self::AvgStreak => "Avg Streak",
        }
    }

    /// Unit appended to the formatted value.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::OnboardingRate => "%",
            Self::AvgStreak => " days",
            _ => "",
        }
    }

    /// Window the metric is computed over.
    #[must_use]
    pub fn window(self, now: DateTime<Utc>) -> TimeWindow {
        match self {
            Self::ActiveUsers | Self::NewUsers | Self::TipsViewed => TimeWindow::today(now),
            Self::OnboardingRate | Self::AvgStreak => TimeWindow::last_days(now, 30),
        }
    }

    /// Event names the metric reads; empty means all events.
    #[must_use]
    pub fn event_names(self) -> Vec<&'static str> {
        match self {
            Self::ActiveUsers => Vec::new(),
            Self::NewUsers => vec![event_names::ONBOARDING_STARTED],
            Self::OnboardingRate => vec![
                event_names::ONBOARDING_STARTED,
                event_names::ONBOARDING_COMPLETED,
            ],
            Self::TipsViewed => vec![event_names::TIP_VIEWED],
            Self::AvgStreak => vec![event_names::STREAK_UPDATED],
        }
    }

    /// Computes the metric from events already restricted to its window.
    #[must_use]
    pub fn compute(self, events: &[Event]) -> u64 {
        match self {
            Self::ActiveUsers => unique_users(events) as u64,
            Self::NewUsers => count_named(events, event_names::ONBOARDING_STARTED) as u64,
            Self::OnboardingRate => u64::from(onboarding_rate(events)),
            Self::TipsViewed => count_named(events, event_names::TIP_VIEWED) as u64,
            Self::AvgStreak => average_streak(events),
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One computed headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadlineMetric {
    /// Metric.
    pub key: MetricKey,
    /// Value.
    pub value: u64,
}

/// All headline metrics in card order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadlineMetrics {
    /// Computed cards.
    pub metrics: Vec<HeadlineMetric>,
}

impl HeadlineMetrics {
    /// Value of one card, 0 when absent.
    #[must_use]
    pub fn value(&self, key: MetricKey) -> u64 {
        self.metrics
            .iter()
            .find(|m| m.key == key)
            .map_or(0, |m| m.value)
    }
}
