//! Admin login and logout.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{LoginRequest, LoginResponse, LogoutResponse};
use crate::app_state::AppState;
use crate::auth::{clear_session_cookie, session_cookie};
use crate::error::{AdminError, ErrorResponse};

/// `POST /admin/api/login` — Exchange the admin password for a session.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a malformed body,
/// [`AdminError::InvalidCredentials`] for a wrong password, and
/// [`AdminError::NotConfigured`] when no password is set.
#[utoipa::path(
    post,
    path = "/admin/api/login",
    tag = "Auth",
    summary = "Log in",
    description = "Checks the admin password and sets a signed `admin_session` cookie.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse),
        (status = 503, description = "No admin password configured", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AdminError> {
    let Json(req) = body.map_err(|e| AdminError::InvalidRequest(e.body_text()))?;

    if let Err(err) = state.sessions.check_password(&req.password) {
        tracing::warn!(code = err.error_code(), "admin login rejected");
        return Err(err);
    }

    let (token, session) = state.sessions.issue(Utc::now());
    let cookie = session_cookie(
        &token,
        state.sessions.ttl_secs(),
        state.sessions.secure_cookies(),
    );
    tracing::info!(session_id = %session.id, "admin logged in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            expires_at: session.expires_at,
        }),
    ))
}

/// `POST /admin/api/logout` — Clear the session cookie.
#[utoipa::path(
    post,
    path = "/admin/api/logout",
    tag = "Auth",
    summary = "Log out",
    description = "Expires the `admin_session` cookie.",
    responses(
        (status = 200, description = "Cookie cleared", body = LogoutResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(state.sessions.secure_cookies()))],
        Json(LogoutResponse { success: true }),
    )
}

/// Login route, reachable without a session.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/admin/api/login", post(login))
}

/// Logout route, behind the session guard.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/api/logout", post(logout))
}
