//! # vowdash
//!
//! Analytics gateway and admin API for the Daily I Do wedding countdown
//! app.
//!
//! The service reads the app's append-only analytics events and turns them
//! into dashboard widgets: headline metrics, the onboarding funnel, daily
//! engagement, retention, streak distribution and a week-over-week
//! comparison. A hosted language model writes weekly summaries and answers
//! questions about the data. Couples submit their weddings (with photos)
//! through a public form, and admins review them behind a password-gated,
//! signed session.
//!
//! ## Architecture
//!
//! ```text
//! Clients (admin dashboard, submission form)
//!     │
//!     ├── REST Handlers (api/) ── session guard (auth/)
//!     │
//!     ├── Services (service/)
//!     │     ├── analytics/ ── report/   pure aggregation and rendering
//!     │     ├── llm/                    language model client + prompts
//!     │     └── photos/                 object storage
//!     │
//!     └── Stores (persistence/): PostgreSQL or in-memory
//! ```

pub mod analytics;
pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod persistence;
pub mod photos;
pub mod report;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;
