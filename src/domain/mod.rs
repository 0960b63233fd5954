//! Domain layer: analytics events, wedding submissions, stored summaries,
//! and the time windows used to query them.
//!
//! Everything here is plain data. Rows are produced by the store layer
//! ([`crate::persistence`]) and consumed by the pure aggregation functions
//! in [`crate::analytics`].

pub mod event;
pub mod submission;
pub mod summary;
pub mod window;

pub use event::{Event, event_names};
pub use submission::{NewSubmission, Submission, SubmissionStatus};
pub use summary::{NewSummary, PeriodType, Summary};
pub use window::TimeWindow;
