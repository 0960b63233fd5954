//! REST endpoint handlers organized by resource.

pub mod auth;
pub mod dashboard;
pub mod insights;
pub mod submissions;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Admin routes that require a session.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::routes())
        .merge(insights::routes())
        .merge(submissions::routes())
        .merge(auth::routes())
        .merge(system::admin_fallback_routes())
}

/// Routes reachable without a session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(system::routes())
        .merge(auth::public_routes())
        .nest("/api/v1", submissions::public_routes())
}
