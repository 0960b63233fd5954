//! Summary and chat DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Summary;

/// A stored weekly summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryResponse {
    /// Model-written text.
    pub summary: String,
    /// First day covered.
    pub period_start: NaiveDate,
    /// Last day covered.
    pub period_end: NaiveDate,
    /// Metrics the prompt was built from.
    #[schema(value_type = Object)]
    pub key_metrics: serde_json::Value,
    /// When the summary was generated.
    pub created_at: DateTime<Utc>,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            summary: summary.summary_text,
            period_start: summary.period_start,
            period_end: summary.period_end,
            key_metrics: summary.key_metrics,
            created_at: summary.created_at,
        }
    }
}

/// The latest summary, if one covers the last week.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LatestSummaryResponse {
    /// `null` when nothing was generated in the last seven days.
    pub summary: Option<SummaryResponse>,
}

/// Request body for `POST /admin/api/chat`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The question.
    pub message: String,
}

/// Response body for `POST /admin/api/chat`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    /// The model's answer.
    pub response: String,
}
