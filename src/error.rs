//! Service error types with HTTP status code mapping.
//!
//! [`AdminError`] is the central error type. Each variant maps to a
//! specific HTTP status code and a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid password",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`AdminError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category            | HTTP Status                     |
/// |-----------|---------------------|---------------------------------|
/// | 1000–1999 | Validation / auth   | 400 Bad Request / 401           |
/// | 2000–2999 | Not Found           | 404 Not Found                   |
/// | 3000–3999 | Server / upstream   | 500 / 502 / 503                 |
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Submitted admin password did not match.
    #[error("invalid password")]
    InvalidCredentials,

    /// Missing, expired, or tampered session.
    #[error("authentication required")]
    Unauthorized,

    /// Requested headline metric does not exist.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    /// Event, submission, or summary store failure.
    #[error("store error: {0}")]
    Store(String),

    /// A feature is disabled because its configuration is absent.
    #[error("{0}")]
    NotConfigured(String),

    /// Object storage upload failed.
    #[error("object storage error: {0}")]
    ObjectStorage(String),

    /// Hosted language model call failed or returned nothing usable.
    #[error("language model error: {0}")]
    Llm(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidCredentials => 1002,
            Self::Unauthorized => 1003,
            Self::UnknownMetric(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Store(_) => 3001,
            Self::NotConfigured(_) => 3002,
            Self::ObjectStorage(_) => 3003,
            Self::Llm(_) => 3004,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UnknownMetric(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ObjectStorage(_) | Self::Llm(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message shown to clients.
    ///
    /// Upstream and store failures are replaced by a generic sentence; the
    /// underlying cause is logged instead of returned.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Internal(_) => {
                "Something went wrong. Please try again.".to_string()
            }
            Self::ObjectStorage(_) => {
                "There was an error uploading your photos. Please try again.".to_string()
            }
            Self::Llm(_) => "The AI service failed to respond. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for AdminError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_ranges() {
        assert_eq!(AdminError::InvalidRequest("x".into()).error_code(), 1001);
        assert_eq!(AdminError::InvalidCredentials.error_code(), 1002);
        assert_eq!(AdminError::UnknownMetric("x".into()).error_code(), 2001);
        assert_eq!(AdminError::NotConfigured("x".into()).error_code(), 3002);
    }

    #[test]
    fn statuses_match_categories() {
        assert_eq!(
            AdminError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AdminError::NotConfigured("no key".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AdminError::Llm("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn upstream_details_are_not_leaked() {
        let err = AdminError::Store("connection refused to 10.0.0.3".into());
        assert!(!err.public_message().contains("10.0.0.3"));

        let err = AdminError::NotConfigured("AI chat is not configured.".into());
        assert_eq!(err.public_message(), "AI chat is not configured.");
    }

    #[test]
    fn into_response_sets_status() {
        let response = AdminError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
