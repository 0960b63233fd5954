//! Middleware requiring a valid admin session.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;

use super::session::session_from_headers;
use crate::app_state::AppState;
use crate::error::AdminError;

/// Login page users are sent to when their session is missing.
pub const LOGIN_PAGE: &str = "/admin/login";

/// Rejects requests without a valid session cookie.
///
/// Mounted as a `route_layer` on the protected admin routes only, so the
/// login page and the login endpoint stay reachable. API paths answer
/// 401 JSON; page paths redirect to the login page. The verified
/// [`super::Session`] is inserted into the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = session_from_headers(request.headers())
        .ok_or(AdminError::Unauthorized)
        .and_then(|token| state.sessions.verify(token, Utc::now()));

    match verified {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(err) => {
            let path = request.uri().path();
            tracing::debug!(path, "admin request without valid session");
            if is_api_path(path) {
                err.into_response()
            } else {
                Redirect::to(LOGIN_PAGE).into_response()
            }
        }
    }
}

fn is_api_path(path: &str) -> bool {
    path == "/admin/api" || path.starts_with("/admin/api/")
}
