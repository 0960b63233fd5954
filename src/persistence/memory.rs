//! In-process store for demos and tests. Nothing survives a restart.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use super::{EventQuery, EventStore, SortOrder, SubmissionStore, SummaryStore};
use crate::domain::{Event, NewSubmission, NewSummary, PeriodType, Submission, Summary};
use crate::error::AdminError;

/// Vectors behind async read-write locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
    submissions: RwLock<Vec<Submission>>,
    summaries: RwLock<Vec<Summary>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with events.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
            ..Self::default()
        }
    }

    /// Appends events, assigning row IDs to those without one.
    pub async fn push_events(&self, new_events: impl IntoIterator<Item = Event>) {
        let mut events = self.events.write().await;
        for mut event in new_events {
            if event.id == 0 {
                event.id = i64::try_from(events.len()).unwrap_or(i64::MAX).saturating_add(1);
            }
            events.push(event);
        }
    }

    /// Appends a fully-formed submission row.
    pub async fn push_submission(&self, submission: Submission) {
        self.submissions.write().await.push(submission);
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<Event>, AdminError> {
        let events = self.events.read().await;
        let mut selected: Vec<Event> = events.iter().filter(|e| query.matches(e)).cloned().collect();
        match query.order {
            SortOrder::OldestFirst => selected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::NewestFirst => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        if let Some(limit) = query.limit {
            selected.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(selected)
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<Submission, AdminError> {
        let stored = submission.into_submission(Utc::now());
        self.submissions.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_submissions(&self, limit: Option<i64>) -> Result<Vec<Submission>, AdminError> {
        let mut rows = self.submissions.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(rows)
    }
}

#[async_trait]
impl SummaryStore for MemoryStore {
    async fn insert_summary(&self, summary: NewSummary) -> Result<Summary, AdminError> {
        let stored = summary.into_summary(Utc::now());
        self.summaries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn latest_summary(
        &self,
        period_type: PeriodType,
        since: NaiveDate,
    ) -> Result<Option<Summary>, AdminError> {
        let summaries = self.summaries.read().await;
        Ok(summaries
            .iter()
            .filter(|s| s.period_type == period_type && s.period_start >= since)
            .max_by_key(|s| s.created_at)
            .cloned())
    }
}
