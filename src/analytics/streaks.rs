//! Streak distribution: each user's latest reported streak, bucketed.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Event, event_names};

/// Payload field carrying the streak length.
pub const STREAK_FIELD: &str = "current_streak";

/// Fixed streak-length buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakBucket {
    /// No streak.
    Zero,
    /// 1–3 days.
    OneToThree,
    /// 4–7 days.
    FourToSeven,
    /// 8–14 days.
    EightToFourteen,
    /// 15 days or more.
    FifteenPlus,
}

impl StreakBucket {
    /// All buckets in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Zero,
        Self::OneToThree,
        Self::FourToSeven,
        Self::EightToFourteen,
        Self::FifteenPlus,
    ];

    /// Classifies a streak length. Upper bounds are inclusive, so a
    /// fractional 3.5 falls in 4-7.
    #[must_use]
    pub fn of(streak: f64) -> Self {
        if streak <= 0.0 {
            Self::Zero
        } else if streak <= 3.0 {
            Self::OneToThree
        } else if streak <= 7.0 {
            Self::FourToSeven
        } else if streak <= 14.0 {
            Self::EightToFourteen
        } else {
            Self::FifteenPlus
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Zero => "0 days",
            Self::OneToThree => "1-3 days",
            Self::FourToSeven => "4-7 days",
            Self::EightToFourteen => "8-14 days",
            Self::FifteenPlus => "15+ days",
        }
    }
}

/// User count for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakBucketCount {
    /// Bucket.
    pub bucket: StreakBucket,
    /// Bucket label.
    pub label: &'static str,
    /// Users whose latest streak falls in the bucket.
    pub users: usize,
}

/// Users per streak bucket, in bucket order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakDistribution {
    /// One entry per bucket, always all five.
    pub buckets: Vec<StreakBucketCount>,
}

impl StreakDistribution {
    /// Buckets the given per-user streaks.
    #[must_use]
    pub fn from_streaks<'a>(streaks: impl IntoIterator<Item = &'a f64>) -> Self {
        let mut counts: HashMap<StreakBucket, usize> = HashMap::new();
        for streak in streaks {
            *counts.entry(StreakBucket::of(*streak)).or_insert(0) += 1;
        }
        Self {
            buckets: StreakBucket::ALL
                .iter()
                .map(|bucket| StreakBucketCount {
                    bucket: *bucket,
                    label: bucket.label(),
                    users: counts.get(bucket).copied().unwrap_or(0),
                })
                .collect(),
        }
    }

    /// Distribution of each user's latest streak.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        Self::from_streaks(latest_streaks(events).values())
    }

    /// Users in `bucket`.
    #[must_use]
    pub fn users_in(&self, bucket: StreakBucket) -> usize {
        self.buckets
            .iter()
            .find(|b| b.bucket == bucket)
            .map_or(0, |b| b.users)
    }

    /// Users across all buckets.
    #[must_use]
    pub fn total_users(&self) -> usize {
        self.buckets.iter().map(|b| b.users).sum()
    }

    /// `false` when every bucket is empty.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.total_users() > 0
    }
}

/// Streak length carried by a `streak_updated` event; 0 when unreadable.
#[must_use]
pub fn streak_of(event: &Event) -> f64 {
    event.payload_number(STREAK_FIELD).unwrap_or(0.0)
}

/// Latest streak per user, taken from their newest `streak_updated` event.
///
/// Input order does not matter. Events without a user ID are skipped, and
/// users without a `streak_updated` event do not appear.
#[must_use]
pub fn latest_streaks(events: &[Event]) -> HashMap<String, f64> {
    let mut updates: Vec<&Event> = events
        .iter()
        .filter(|e| e.is(event_names::STREAK_UPDATED))
        .collect();
    updates.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut latest = HashMap::new();
    for event in updates {
        if let Some(user) = event.user() {
            latest
                .entry(user.to_string())
                .or_insert_with(|| streak_of(event));
        }
    }
    latest
}

/// Rounded mean of positive streak values over all `streak_updated` events.
#[must_use]
pub fn average_streak(events: &[Event]) -> u64 {
    let positive: Vec<f64> = events
        .iter()
        .filter(|e| e.is(event_names::STREAK_UPDATED))
        .map(streak_of)
        .filter(|s| *s > 0.0)
        .collect();
    if positive.is_empty() {
        return 0;
    }
    let sum: f64 = positive.iter().sum();
    (sum / positive.len() as f64).round() as u64
}
