//! "Real wedding" submissions sent through the public form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Moderation status of a submission.
///
/// Rows with no status, or a status this service does not know, are read
/// as [`SubmissionStatus::Pending`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting moderation.
    #[default]
    Pending,
    /// Accepted for publication.
    Approved,
    /// Declined.
    Rejected,
}

impl SubmissionStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Lower-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Reads a stored status column, defaulting to pending.
    #[must_use]
    pub fn from_column(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown submission status: {other}")),
        }
    }
}

/// A stored submission row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Row identifier.
    pub id: Uuid,
    /// Display names, e.g. `"Sarah & Michael"`.
    pub couple_names: String,
    /// Couple's Instagram handle.
    pub couple_instagram: Option<String>,
    /// Wedding day.
    pub wedding_date: NaiveDate,
    /// Free-text venue or city.
    pub wedding_location: String,
    /// Vendor handles, free text.
    pub vendor_instagrams: Option<String>,
    /// "Favorite detail" answer.
    pub favorite_detail: Option<String>,
    /// Public URLs of the uploaded photos.
    pub photo_urls: Vec<String>,
    /// Whether the submitter accepted the feature terms.
    pub terms_accepted: bool,
    /// Moderation status.
    pub status: SubmissionStatus,
    /// Creation timestamp; defines recency.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    /// Display names.
    pub couple_names: String,
    /// Couple's Instagram handle.
    pub couple_instagram: Option<String>,
    /// Wedding day.
    pub wedding_date: NaiveDate,
    /// Venue or city.
    pub wedding_location: String,
    /// Vendor handles.
    pub vendor_instagrams: Option<String>,
    /// "Favorite detail" answer.
    pub favorite_detail: Option<String>,
    /// Public photo URLs, already uploaded.
    pub photo_urls: Vec<String>,
    /// Whether the terms were accepted.
    pub terms_accepted: bool,
}

impl NewSubmission {
    /// Materializes a pending row with a fresh ID.
    #[must_use]
    pub fn into_submission(self, created_at: DateTime<Utc>) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            couple_names: self.couple_names,
            couple_instagram: self.couple_instagram,
            wedding_date: self.wedding_date,
            wedding_location: self.wedding_location,
            vendor_instagrams: self.vendor_instagrams,
            favorite_detail: self.favorite_detail,
            photo_urls: self.photo_urls,
            terms_accepted: self.terms_accepted,
            status: SubmissionStatus::Pending,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_unknown_status_reads_as_pending() {
        assert_eq!(SubmissionStatus::from_column(None), SubmissionStatus::Pending);
        assert_eq!(
            SubmissionStatus::from_column(Some("archived")),
            SubmissionStatus::Pending
        );
        assert_eq!(
            SubmissionStatus::from_column(Some("Approved")),
            SubmissionStatus::Approved
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&SubmissionStatus::Rejected).ok();
        assert_eq!(json.as_deref(), Some("\"rejected\""));
    }
}
