//! Submission DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Submission, SubmissionStatus};
use crate::error::AdminError;
use crate::report::{SubmissionRowView, SubmissionStats};
use crate::service::SubmissionListing;

/// Response body for an accepted submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionCreatedResponse {
    /// Row identifier.
    pub id: Uuid,
    /// Always `pending`.
    pub status: String,
    /// Photos stored.
    pub photo_count: usize,
}

impl From<&Submission> for SubmissionCreatedResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id,
            status: submission.status.to_string(),
            photo_count: submission.photo_urls.len(),
        }
    }
}

/// Query parameters for the moderation list.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionListParams {
    /// `all` (default), `pending`, `approved` or `rejected`.
    pub status: Option<String>,
}

impl SubmissionListParams {
    /// The status filter, `None` for `all`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for an unknown status.
    pub fn status_filter(&self) -> Result<Option<SubmissionStatus>, AdminError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("" | "all") => Ok(None),
            Some(other) => other.parse().map(Some).map_err(AdminError::InvalidRequest),
        }
    }
}

/// The moderation list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    /// Counts over every submission.
    pub stats: SubmissionStats,
    /// Matching rows, newest first.
    pub data: Vec<SubmissionRowView>,
}

impl From<&SubmissionListing> for SubmissionListResponse {
    fn from(listing: &SubmissionListing) -> Self {
        Self {
            stats: listing.stats,
            data: listing.rows.iter().map(SubmissionRowView::from).collect(),
        }
    }
}
