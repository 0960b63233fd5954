//! Data Transfer Objects for REST request/response serialization.
//!
//! Widget payloads reuse the view types from [`crate::report`]; the types
//! here wrap them and cover the request bodies.

pub mod auth_dto;
pub mod dashboard_dto;
pub mod insight_dto;
pub mod submission_dto;

pub use auth_dto::*;
pub use dashboard_dto::*;
pub use insight_dto::*;
pub use submission_dto::*;
