//! Service layer: business logic orchestration.
//!
//! [`DashboardService`] reads events and runs the aggregations behind each
//! widget, [`InsightService`] drives the language model, and
//! [`SubmissionService`] handles the public form and the moderation list.
//! Dashboard reads never fail: a store error is logged and treated as an
//! empty result.

pub mod dashboard;
pub mod insights;
pub mod submissions;

pub use dashboard::{DashboardService, DashboardSnapshot};
pub use insights::InsightService;
pub use submissions::{PhotoUpload, SubmissionForm, SubmissionListing, SubmissionService};

use crate::domain::Event;
use crate::persistence::{EventQuery, EventStore};

/// Runs `query`, logging a failure and returning no events instead.
pub(crate) async fn fetch_or_empty(
    store: &dyn EventStore,
    query: &EventQuery,
    purpose: &'static str,
) -> Vec<Event> {
    match store.query_events(query).await {
        Ok(events) => events,
        Err(err) => {
            tracing::warn!(purpose, error = %err, "event fetch failed; using empty result");
            Vec::new()
        }
    }
}
