//! Dashboard widgets: one independent read per widget.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::fetch_or_empty;
use crate::analytics::{
    DailyEngagement, Funnel, FunnelBaseline, HeadlineMetric, HeadlineMetrics, MetricKey,
    ONBOARDING_SCREENS, RetentionReport, StreakDistribution, WeeklyReport, build_funnel,
    engagement_series, retention, screen_counts,
};
use crate::domain::{Event, TimeWindow, event_names};
use crate::persistence::{EventQuery, EventStore};

/// Days of history behind the funnel and engagement widgets.
const HISTORY_DAYS: i64 = 30;

/// Every widget, computed from concurrent reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Headline cards.
    pub metrics: HeadlineMetrics,
    /// Onboarding funnel.
    pub funnel: Funnel,
    /// Daily engagement series.
    pub engagement: Vec<DailyEngagement>,
    /// Day-N retention.
    pub retention: RetentionReport,
    /// Streak buckets.
    pub streaks: StreakDistribution,
    /// This week against last week.
    pub weekly: WeeklyReport,
}

/// Reads events and aggregates them per widget.
#[derive(Debug, Clone)]
pub struct DashboardService {
    events: Arc<dyn EventStore>,
    funnel_baseline: FunnelBaseline,
}

impl DashboardService {
    /// Creates a new `DashboardService`.
    #[must_use]
    pub fn new(events: Arc<dyn EventStore>, funnel_baseline: FunnelBaseline) -> Self {
        Self {
            events,
            funnel_baseline,
        }
    }

    /// Baseline used when a request does not choose one.
    #[must_use]
    pub const fn funnel_baseline(&self) -> FunnelBaseline {
        self.funnel_baseline
    }

    async fn fetch(&self, query: EventQuery, purpose: &'static str) -> Vec<Event> {
        fetch_or_empty(self.events.as_ref(), &query, purpose).await
    }

    /// One headline metric over its own window.
    pub async fn metric(&self, key: MetricKey, now: DateTime<Utc>) -> HeadlineMetric {
        let query = EventQuery::all()
            .named(key.event_names())
            .within(key.window(now));
        let events = self.fetch(query, key.as_str()).await;
        HeadlineMetric {
            key,
            value: key.compute(&events),
        }
    }

    /// All headline metrics, read concurrently.
    pub async fn metrics(&self, now: DateTime<Utc>) -> HeadlineMetrics {
        let (active, new_users, onboarding, tips, streak) = tokio::join!(
            self.metric(MetricKey::ActiveUsers, now),
            self.metric(MetricKey::NewUsers, now),
            self.metric(MetricKey::OnboardingRate, now),
            self.metric(MetricKey::TipsViewed, now),
            self.metric(MetricKey::AvgStreak, now),
        );
        HeadlineMetrics {
            metrics: vec![active, new_users, onboarding, tips, streak],
        }
    }

    /// Onboarding funnel over the last 30 days.
    pub async fn funnel(&self, baseline: Option<FunnelBaseline>, now: DateTime<Utc>) -> Funnel {
        let query = EventQuery::all()
            .named([event_names::ONBOARDING_SCREEN_VIEWED])
            .within(TimeWindow::last_days(now, HISTORY_DAYS));
        let events = self.fetch(query, "funnel").await;
        build_funnel(
            &screen_counts(&events),
            &ONBOARDING_SCREENS,
            baseline.unwrap_or(self.funnel_baseline),
        )
    }

    /// Daily engagement over the last 30 days.
    pub async fn engagement(&self, now: DateTime<Utc>) -> Vec<DailyEngagement> {
        let query = EventQuery::all()
            .named(event_names::ENGAGEMENT)
            .within(TimeWindow::last_days(now, HISTORY_DAYS));
        engagement_series(&self.fetch(query, "engagement").await)
    }

    /// Day-N retention over all recorded history.
    pub async fn retention(&self) -> RetentionReport {
        let query = EventQuery::all().named([
            event_names::DAY_1_RETURN,
            event_names::DAY_7_RETURN,
            event_names::DAY_30_RETURN,
            event_names::ONBOARDING_COMPLETED,
        ]);
        retention(&self.fetch(query, "retention").await)
    }

    /// Each user's latest streak, bucketed.
    pub async fn streaks(&self) -> StreakDistribution {
        let query = EventQuery::all()
            .named([event_names::STREAK_UPDATED])
            .newest_first();
        StreakDistribution::from_events(&self.fetch(query, "streaks").await)
    }

    /// This week against last week.
    pub async fn weekly(&self, now: DateTime<Utc>) -> WeeklyReport {
        let window = TimeWindow::since(now - Duration::days(14));
        let events = self.fetch(EventQuery::all().within(window), "weekly").await;
        WeeklyReport::from_events(&events, now)
    }

    /// Every widget at once.
    pub async fn snapshot(
        &self,
        baseline: Option<FunnelBaseline>,
        now: DateTime<Utc>,
    ) -> DashboardSnapshot {
        let (metrics, funnel, engagement, retention, streaks, weekly) = tokio::join!(
            self.metrics(now),
            self.funnel(baseline, now),
            self.engagement(now),
            self.retention(),
            self.streaks(),
            self.weekly(now),
        );
        DashboardSnapshot {
            metrics,
            funnel,
            engagement,
            retention,
            streaks,
            weekly,
        }
    }
}
