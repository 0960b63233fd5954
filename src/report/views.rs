//! Serializable widget shapes returned by the admin API.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    RETENTION_COLORS, STREAK_COLORS, Tone, delta_arrow, dropoff_text, format_count, format_percent,
    funnel_text, long_date, short_date, status_label,
};
use crate::analytics::{
    Comparison, DailyEngagement, Funnel, FunnelBaseline, HeadlineMetric, MetricKey,
    RetentionReport, StreakDistribution, WeeklyMetrics, WeeklyReport,
};
use crate::domain::{Submission, SubmissionStatus};

/// A headline metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MetricCardView {
    /// Metric key.
    pub key: MetricKey,
    /// Card title.
    pub title: String,
    /// Raw value.
    pub value: u64,
    /// Value with separators and suffix, e.g. `"1,234"` or `"62%"`.
    pub display: String,
}

impl From<HeadlineMetric> for MetricCardView {
    fn from(metric: HeadlineMetric) -> Self {
        let value = i64::try_from(metric.value).unwrap_or(i64::MAX);
        Self {
            key: metric.key,
            title: metric.key.title().to_string(),
            value: metric.value,
            display: format!("{}{}", format_count(value), metric.key.suffix()),
        }
    }
}

/// One funnel bar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FunnelBarView {
    /// Screen key.
    pub key: String,
    /// Screen label.
    pub label: String,
    /// Distinct users.
    pub count: usize,
    /// Bar width in percent, within `[0, 100]`.
    pub width: f64,
    /// Caption, e.g. `"50% (12)"`.
    pub text: String,
    /// Dropoff caption, present only when users were lost.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff: Option<String>,
}

/// The onboarding funnel widget.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FunnelView {
    /// Baseline strategy used.
    pub baseline_strategy: FunnelBaseline,
    /// Count shown as 100%.
    pub baseline: usize,
    /// `false` renders the empty state.
    pub has_data: bool,
    /// Bars in funnel order.
    pub bars: Vec<FunnelBarView>,
}

impl From<&Funnel> for FunnelView {
    fn from(funnel: &Funnel) -> Self {
        Self {
            baseline_strategy: funnel.baseline_strategy,
            baseline: funnel.baseline,
            has_data: funnel.has_data,
            bars: funnel
                .steps
                .iter()
                .map(|step| FunnelBarView {
                    key: step.key.to_string(),
                    label: step.label.to_string(),
                    count: step.count,
                    width: step.percentage.clamp(0.0, 100.0),
                    text: funnel_text(step.percentage, step.count),
                    dropoff: dropoff_text(step.dropoff),
                })
                .collect(),
        }
    }
}

/// One day on the engagement chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EngagementPointView {
    /// Calendar day.
    pub date: NaiveDate,
    /// Axis label, e.g. `"Oct 16"`.
    pub label: String,
    /// Distinct active users.
    pub active_users: usize,
    /// Tips viewed.
    pub tips_viewed: usize,
    /// Checklist items completed.
    pub checklist_completions: usize,
}

/// Legend entry for one engagement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EngagementSeries {
    /// Field of [`EngagementPointView`] the line plots.
    pub key: String,
    /// Legend label.
    pub label: String,
    /// Line color.
    pub color: String,
}

/// The daily engagement chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EngagementView {
    /// `false` renders the empty state.
    pub has_data: bool,
    /// Lines drawn.
    pub series: Vec<EngagementSeries>,
    /// Points ordered by date.
    pub points: Vec<EngagementPointView>,
}

impl EngagementView {
    /// Builds the chart from a date-ordered series.
    #[must_use]
    pub fn new(days: &[DailyEngagement]) -> Self {
        let series = [
            ("active_users", "Active Users", "#c48b98"),
            ("tips_viewed", "Tips Viewed", "#6366f1"),
            ("checklist_completions", "Checklist Items", "#22c55e"),
        ]
        .into_iter()
        .map(|(key, label, color)| EngagementSeries {
            key: key.to_string(),
            label: label.to_string(),
            color: color.to_string(),
        })
        .collect();

        Self {
            has_data: !days.is_empty(),
            series,
            points: days
                .iter()
                .map(|day| EngagementPointView {
                    date: day.date,
                    label: short_date(day.date),
                    active_users: day.active_users,
                    tips_viewed: day.tips_viewed,
                    checklist_completions: day.checklist_completions,
                })
                .collect(),
        }
    }
}

/// One retention bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RetentionBarView {
    /// `"Day 1"`, `"Day 7"` or `"Day 30"`.
    pub label: String,
    /// Rate in percent.
    pub rate: u32,
    /// Caption, e.g. `"42%"`.
    pub text: String,
    /// Bar color.
    pub color: String,
}

/// The retention chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RetentionView {
    /// Completed onboardings the rates are relative to.
    pub cohort: usize,
    /// Bars in day order.
    pub bars: Vec<RetentionBarView>,
}

impl From<&RetentionReport> for RetentionView {
    fn from(report: &RetentionReport) -> Self {
        Self {
            cohort: report.cohort,
            bars: report
                .points()
                .into_iter()
                .zip(RETENTION_COLORS)
                .map(|((label, rate), color)| RetentionBarView {
                    label: label.to_string(),
                    rate,
                    text: format_percent(f64::from(rate)),
                    color: color.to_string(),
                })
                .collect(),
        }
    }
}

/// One slice of the streak pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StreakSliceView {
    /// Bucket label, e.g. `"4-7 days"`.
    pub label: String,
    /// Users in the bucket.
    pub users: usize,
    /// Slice color.
    pub color: String,
}

/// The streak distribution pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StreakView {
    /// `false` when every bucket is empty.
    pub has_data: bool,
    /// Users with a reported streak.
    pub total_users: usize,
    /// Slices in bucket order.
    pub slices: Vec<StreakSliceView>,
}

impl From<&StreakDistribution> for StreakView {
    fn from(distribution: &StreakDistribution) -> Self {
        Self {
            has_data: distribution.has_data(),
            total_users: distribution.total_users(),
            slices: distribution
                .buckets
                .iter()
                .zip(STREAK_COLORS.iter().cycle())
                .map(|(bucket, color)| StreakSliceView {
                    label: bucket.label.to_string(),
                    users: bucket.users,
                    color: (*color).to_string(),
                })
                .collect(),
        }
    }
}

/// One week-over-week row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeltaView {
    /// Row label.
    pub label: String,
    /// This week.
    pub current: i64,
    /// Last week.
    pub previous: i64,
    /// `current − previous`.
    pub delta: i64,
    /// Arrow caption, e.g. `"↑ 3"`.
    pub arrow: String,
    /// Direction color.
    pub tone: Tone,
}

impl DeltaView {
    fn new(label: &str, comparison: Comparison) -> Self {
        Self {
            label: label.to_string(),
            current: comparison.current,
            previous: comparison.previous,
            delta: comparison.delta,
            arrow: delta_arrow(comparison.delta),
            tone: Tone::for_delta(comparison.delta),
        }
    }
}

/// This week against last week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeeklyView {
    /// Snapshot of the last seven days.
    pub this_week: WeeklyMetrics,
    /// Snapshot of the seven days before.
    pub last_week: WeeklyMetrics,
    /// Comparison rows.
    pub deltas: Vec<DeltaView>,
}

impl From<&WeeklyReport> for WeeklyView {
    fn from(report: &WeeklyReport) -> Self {
        Self {
            this_week: report.this_week,
            last_week: report.last_week,
            deltas: vec![
                DeltaView::new("Active users", report.active_users),
                DeltaView::new("Total events", report.total_events),
                DeltaView::new("Tips viewed", report.tips_viewed),
                DeltaView::new("Onboarding completion %", report.completion_rate),
            ],
        }
    }
}

/// Capitalized status with its tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusBadge {
    /// e.g. `"Pending"`.
    pub label: String,
    /// Badge color class.
    pub tone: Tone,
}

impl From<SubmissionStatus> for StatusBadge {
    fn from(status: SubmissionStatus) -> Self {
        Self {
            label: status_label(status),
            tone: Tone::for_status(status),
        }
    }
}

/// Counts shown above the submissions table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionStats {
    /// Every submission.
    pub total: usize,
    /// Awaiting moderation.
    pub pending: usize,
    /// Accepted.
    pub approved: usize,
    /// Declined.
    pub rejected: usize,
}

impl SubmissionStats {
    /// Counts statuses over all rows.
    #[must_use]
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        submissions
            .iter()
            .fold(Self::default(), |mut stats, submission| {
                stats.total += 1;
                match submission.status {
                    SubmissionStatus::Pending => stats.pending += 1,
                    SubmissionStatus::Approved => stats.approved += 1,
                    SubmissionStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }
}

/// One row of the submissions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionRowView {
    /// Row identifier.
    pub id: Uuid,
    /// Display names.
    pub couple_names: String,
    /// Couple handle.
    pub couple_instagram: Option<String>,
    /// Venue or city.
    pub wedding_location: String,
    /// Wedding day, e.g. `"Oct 16, 2025"`.
    pub wedding_date: String,
    /// Submission day, same format.
    pub submitted_on: String,
    /// Number of uploaded photos.
    pub photo_count: usize,
    /// Photo URLs.
    pub photo_urls: Vec<String>,
    /// Status badge.
    pub status: StatusBadge,
}

impl From<&Submission> for SubmissionRowView {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            couple_names: submission.couple_names.clone(),
            couple_instagram: submission.couple_instagram.clone(),
            wedding_location: submission.wedding_location.clone(),
            wedding_date: long_date(submission.wedding_date),
            submitted_on: long_date(submission.created_at.date_naive()),
            photo_count: submission.photo_urls.len(),
            photo_urls: submission.photo_urls.clone(),
            status: submission.status.into(),
        }
    }
}
