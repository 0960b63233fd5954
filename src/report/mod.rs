//! Display formatting for the dashboard.
//!
//! Turns aggregation results into the strings, widths, and colors the
//! dashboard draws. Nothing here touches a store; [`views`] holds the
//! serializable widget shapes built from these helpers.

pub mod views;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::SubmissionStatus;

pub use views::{
    DeltaView, EngagementPointView, EngagementSeries, EngagementView, FunnelBarView, FunnelView,
    MetricCardView, RetentionBarView, RetentionView, StatusBadge, StreakSliceView, StreakView,
    SubmissionRowView, SubmissionStats, WeeklyView,
};

/// Traffic-light classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Good.
    Green,
    /// Middling.
    Yellow,
    /// Bad.
    Red,
}

impl Tone {
    /// Tone of a percentage: green at 60 and above, yellow at 30 and above.
    #[must_use]
    pub fn for_percent(percent: f64) -> Self {
        if percent >= 60.0 {
            Self::Green
        } else if percent >= 30.0 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    /// Tone of a signed change: up is green, down is red.
    #[must_use]
    pub const fn for_delta(delta: i64) -> Self {
        if delta > 0 {
            Self::Green
        } else if delta < 0 {
            Self::Red
        } else {
            Self::Yellow
        }
    }

    /// Tone of a moderation status.
    #[must_use]
    pub const fn for_status(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Approved => Self::Green,
            SubmissionStatus::Rejected => Self::Red,
            SubmissionStatus::Pending => Self::Yellow,
        }
    }

    /// Hex color drawn for this tone.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Green => "#22c55e",
            Self::Yellow => "#eab308",
            Self::Red => "#ef4444",
        }
    }
}

/// Retention bar colors, day 1 through day 30.
pub const RETENTION_COLORS: [&str; 3] = ["#22c55e", "#eab308", "#ef4444"];

/// Streak pie palette, from the zero bucket up.
pub const STREAK_COLORS: [&str; 5] = ["#ef4444", "#f97316", "#eab308", "#22c55e", "#14b8a6"];

/// Rounds to the nearest integer and appends `%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// Integer with `,` thousands separators.
#[must_use]
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Funnel bar caption: `"50% (12)"`.
#[must_use]
pub fn funnel_text(percentage: f64, count: usize) -> String {
    format!("{} ({count})", format_percent(percentage))
}

/// Dropoff caption `"-3"`, shown only when users were lost.
#[must_use]
pub fn dropoff_text(dropoff: i64) -> Option<String> {
    (dropoff > 0).then(|| format!("-{dropoff}"))
}

/// Week-over-week arrow: `"↑ 3"`, `"↓ 2"`, or `"→ 0"`.
#[must_use]
pub fn delta_arrow(delta: i64) -> String {
    match delta.signum() {
        1 => format!("↑ {}", format_count(delta)),
        -1 => format!("↓ {}", format_count(delta.saturating_abs())),
        _ => "→ 0".to_string(),
    }
}

/// Chart axis label: `"Oct 16"`.
#[must_use]
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Table date: `"Oct 16, 2025"`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Status with its first letter capitalized.
#[must_use]
pub fn status_label(status: SubmissionStatus) -> String {
    let raw = status.as_str();
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
