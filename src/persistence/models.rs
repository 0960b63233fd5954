//! Database row shapes and their conversion into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{Event, PeriodType, Submission, SubmissionStatus, Summary};
use crate::error::AdminError;

/// A row from `analytics_events`.
pub type EventRow = (
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<serde_json::Value>,
    DateTime<Utc>,
);

/// Converts an [`EventRow`] into an [`Event`].
#[must_use]
pub fn event_from_row(row: EventRow) -> Event {
    let (id, event_name, user_id, screen_name, event_data, created_at) = row;
    Event {
        id,
        event_name,
        user_id,
        screen_name,
        event_data,
        created_at,
    }
}

/// A row from `submissions`.
///
/// Nullable columns the form always fills are still read as `Option` so
/// rows written by older clients load.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubmissionRow {
    /// Row identifier.
    pub id: Uuid,
    /// Display names.
    pub couple_names: String,
    /// Couple handle.
    pub couple_instagram: Option<String>,
    /// Wedding day.
    pub wedding_date: NaiveDate,
    /// Venue or city.
    pub wedding_location: String,
    /// Vendor handles.
    pub vendor_instagrams: Option<String>,
    /// Favorite detail.
    pub favorite_detail: Option<String>,
    /// Photo URLs.
    pub photo_urls: Option<Vec<String>>,
    /// Terms flag.
    pub terms_accepted: Option<bool>,
    /// Status column; may be null.
    pub status: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for Submission {
    fn from(row: SubmissionRow) -> Self {
        Self {
            id: row.id,
            couple_names: row.couple_names,
            couple_instagram: row.couple_instagram,
            wedding_date: row.wedding_date,
            wedding_location: row.wedding_location,
            vendor_instagrams: row.vendor_instagrams,
            favorite_detail: row.favorite_detail,
            photo_urls: row.photo_urls.unwrap_or_default(),
            terms_accepted: row.terms_accepted.unwrap_or(false),
            status: SubmissionStatus::from_column(row.status.as_deref()),
            created_at: row.created_at,
        }
    }
}

/// A row from `analytics_summaries`.
pub type SummaryRow = (
    Uuid,
    String,
    NaiveDate,
    NaiveDate,
    String,
    serde_json::Value,
    DateTime<Utc>,
);

/// Converts a [`SummaryRow`] into a [`Summary`].
///
/// # Errors
///
/// Returns [`AdminError::Store`] when `period_type` holds an unknown value.
pub fn summary_from_row(row: SummaryRow) -> Result<Summary, AdminError> {
    let (id, period_type, period_start, period_end, summary_text, key_metrics, created_at) = row;
    let period_type = period_type
        .parse::<PeriodType>()
        .map_err(|e| AdminError::Store(format!("summary {id}: {e}")))?;
    Ok(Summary {
        id,
        period_type,
        period_start,
        period_end,
        summary_text,
        key_metrics,
        created_at,
    })
}
