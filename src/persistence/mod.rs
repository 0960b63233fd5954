//! Persistence layer: event, submission, and summary stores.
//!
//! Each concern is a trait so handlers and services receive explicitly
//! constructed store handles through [`crate::app_state::AppState`]
//! instead of reaching for a global client. [`postgres::PostgresStore`]
//! backs production; [`memory::MemoryStore`] backs demos and tests.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Event, NewSubmission, NewSummary, PeriodType, Submission, Summary, TimeWindow,
};
use crate::error::AdminError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Row order by `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    #[default]
    OldestFirst,
    /// Descending.
    NewestFirst,
}

/// Filter over the events table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Event names to include; empty means every name.
    pub names: Vec<String>,
    /// `created_at` bounds.
    pub window: Option<TimeWindow>,
    /// Row order.
    pub order: SortOrder,
    /// Maximum rows returned.
    pub limit: Option<i64>,
}

impl EventQuery {
    /// Every event, oldest first.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to the given event names.
    #[must_use]
    pub fn named<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts to a time window.
    #[must_use]
    pub const fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Orders newest first.
    #[must_use]
    pub const fn newest_first(mut self) -> Self {
        self.order = SortOrder::NewestFirst;
        self
    }

    /// Caps the number of rows.
    #[must_use]
    pub const fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns `true` if `event` passes the name and window filters.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        let name_ok = self.names.is_empty() || self.names.iter().any(|n| *n == event.event_name);
        let window_ok = self.window.is_none_or(|w| w.contains(event.created_at));
        name_ok && window_ok
    }
}

/// Read access to the append-only events table.
#[async_trait]
pub trait EventStore: Send + Sync + fmt::Debug {
    /// Runs a filtered read.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] on backend failure.
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<Event>, AdminError>;
}

/// Insert and list access to wedding submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync + fmt::Debug {
    /// Inserts a pending submission and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] on backend failure.
    async fn insert_submission(&self, submission: NewSubmission)
    -> Result<Submission, AdminError>;

    /// Lists submissions newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] on backend failure.
    async fn list_submissions(&self, limit: Option<i64>) -> Result<Vec<Submission>, AdminError>;
}

/// Insert and lookup access to generated summaries.
#[async_trait]
pub trait SummaryStore: Send + Sync + fmt::Debug {
    /// Stores a summary and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] on backend failure.
    async fn insert_summary(&self, summary: NewSummary) -> Result<Summary, AdminError>;

    /// Newest summary of `period_type` whose `period_start >= since`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Store`] on backend failure.
    async fn latest_summary(
        &self,
        period_type: PeriodType,
        since: NaiveDate,
    ) -> Result<Option<Summary>, AdminError>;
}

/// The three store handles, cloned into every request.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Events.
    pub events: Arc<dyn EventStore>,
    /// Submissions.
    pub submissions: Arc<dyn SubmissionStore>,
    /// Summaries.
    pub summaries: Arc<dyn SummaryStore>,
}

impl Stores {
    /// Uses one backend for all three concerns.
    #[must_use]
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: EventStore + SubmissionStore + SummaryStore + 'static,
    {
        let events: Arc<dyn EventStore> = Arc::<S>::clone(&store);
        let submissions: Arc<dyn SubmissionStore> = Arc::<S>::clone(&store);
        Self {
            events,
            submissions,
            summaries: store,
        }
    }
}
