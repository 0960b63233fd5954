//! System endpoints: health check and the admin login page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{any, get};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Admin Login</title>
</head>
<body>
<main>
<h1>Admin Dashboard</h1>
<form id="login">
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
<button type="submit">Sign in</button>
<p id="error" role="alert" hidden>Invalid password</p>
</form>
</main>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const password = document.getElementById("password").value;
  const res = await fetch("/admin/api/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ password }),
  });
  if (res.ok) {
    window.location.href = "/admin";
  } else {
    document.getElementById("error").hidden = false;
  }
});
</script>
</body>
</html>
"#;

/// `GET /admin/login` — Login form.
#[utoipa::path(
    get,
    path = "/admin/login",
    tag = "Auth",
    summary = "Login page",
    description = "HTML form that posts the admin password to `/admin/api/login`.",
    responses(
        (status = 200, description = "Login form", content_type = "text/html", body = String),
    )
)]
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Unknown path under `/admin`. Mounted behind the session guard, so
/// visitors without a session are redirected to the login page first.
pub async fn admin_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// System routes mounted at the root level, outside the session guard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/admin/login", get(login_page))
}

/// Catch-all for the rest of `/admin`, behind the session guard.
pub fn admin_fallback_routes() -> Router<AppState> {
    Router::new().route("/admin/{*rest}", any(admin_not_found))
}
