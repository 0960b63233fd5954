//! LLM-written analytics summaries.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reporting period a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Seven days ending on `period_end`.
    Weekly,
}

impl PeriodType {
    /// Column value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
        }
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            other => Err(format!("unknown period type: {other}")),
        }
    }
}

/// A stored summary. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Row identifier.
    pub id: Uuid,
    /// Reporting period.
    pub period_type: PeriodType,
    /// First day covered.
    pub period_start: NaiveDate,
    /// Last day covered.
    pub period_end: NaiveDate,
    /// Model output, stored verbatim.
    pub summary_text: String,
    /// Metrics the prompt was built from.
    pub key_metrics: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a summary.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSummary {
    /// Reporting period.
    pub period_type: PeriodType,
    /// First day covered.
    pub period_start: NaiveDate,
    /// Last day covered.
    pub period_end: NaiveDate,
    /// Model output.
    pub summary_text: String,
    /// Metrics the prompt was built from.
    pub key_metrics: serde_json::Value,
}

impl NewSummary {
    /// Materializes a row with a fresh ID.
    #[must_use]
    pub fn into_summary(self, created_at: DateTime<Utc>) -> Summary {
        Summary {
            id: Uuid::new_v4(),
            period_type: self.period_type,
            period_start: self.period_start,
            period_end: self.period_end,
            summary_text: self.summary_text,
            key_metrics: self.key_metrics,
            created_at,
        }
    }
}
