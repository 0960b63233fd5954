//! Login and logout DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /admin/api/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Admin password.
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always `true`.
    pub success: bool,
    /// When the issued session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Response body for `POST /admin/api/logout`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogoutResponse {
    /// Always `true`.
    pub success: bool,
}
