//! Dashboard widget handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::analytics::MetricKey;
use crate::api::dto::{DashboardResponse, FunnelParams, MetricsResponse};
use crate::app_state::AppState;
use crate::error::{AdminError, ErrorResponse};
use crate::report::{
    EngagementView, FunnelView, MetricCardView, RetentionView, StreakView, WeeklyView,
};

/// `GET /admin` — Every widget in one document.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for an unknown funnel baseline.
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Dashboard",
    summary = "Whole dashboard",
    description = "Headline cards, funnel, engagement, retention, streaks and the weekly comparison, read concurrently. Store failures show as zeros.",
    params(FunnelParams),
    responses(
        (status = 200, description = "Dashboard document", body = DashboardResponse),
        (status = 400, description = "Unknown baseline", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    params: Result<Query<FunnelParams>, QueryRejection>,
) -> Result<Json<DashboardResponse>, AdminError> {
    let Query(params) = params.map_err(|e| AdminError::InvalidRequest(e.body_text()))?;
    let now = Utc::now();
    let snapshot = state.dashboard.snapshot(params.baseline, now).await;
    Ok(Json(DashboardResponse::render(&snapshot, now)))
}

/// `GET /admin/api/metrics` — Headline cards.
#[utoipa::path(
    get,
    path = "/admin/api/metrics",
    tag = "Dashboard",
    summary = "Headline metrics",
    description = "Users today, new signups, onboarding rate, tips viewed and average streak.",
    responses(
        (status = 200, description = "Metric cards", body = MetricsResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let headline = state.dashboard.metrics(Utc::now()).await;
    Json(MetricsResponse {
        metrics: headline
            .metrics
            .into_iter()
            .map(MetricCardView::from)
            .collect(),
    })
}

/// `GET /admin/api/metrics/{key}` — One headline card.
///
/// # Errors
///
/// Returns [`AdminError::UnknownMetric`] for an unknown key.
#[utoipa::path(
    get,
    path = "/admin/api/metrics/{key}",
    tag = "Dashboard",
    summary = "Single headline metric",
    params(
        ("key" = MetricKey, Path, description = "Metric key"),
    ),
    responses(
        (status = 200, description = "Metric card", body = MetricCardView),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 404, description = "Unknown metric", body = ErrorResponse),
    )
)]
pub async fn metric(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MetricCardView>, AdminError> {
    let key: MetricKey = key.parse().map_err(AdminError::UnknownMetric)?;
    let metric = state.dashboard.metric(key, Utc::now()).await;
    Ok(Json(metric.into()))
}

/// `GET /admin/api/funnel` — Onboarding funnel over the last 30 days.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for an unknown baseline.
#[utoipa::path(
    get,
    path = "/admin/api/funnel",
    tag = "Dashboard",
    summary = "Onboarding funnel",
    params(FunnelParams),
    responses(
        (status = 200, description = "Funnel bars", body = FunnelView),
        (status = 400, description = "Unknown baseline", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn funnel(
    State(state): State<AppState>,
    params: Result<Query<FunnelParams>, QueryRejection>,
) -> Result<Json<FunnelView>, AdminError> {
    let Query(params) = params.map_err(|e| AdminError::InvalidRequest(e.body_text()))?;
    let funnel = state.dashboard.funnel(params.baseline, Utc::now()).await;
    Ok(Json(FunnelView::from(&funnel)))
}

/// `GET /admin/api/engagement` — Daily engagement over the last 30 days.
#[utoipa::path(
    get,
    path = "/admin/api/engagement",
    tag = "Dashboard",
    summary = "Daily engagement",
    responses(
        (status = 200, description = "Engagement series", body = EngagementView),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn engagement(State(state): State<AppState>) -> Json<EngagementView> {
    let days = state.dashboard.engagement(Utc::now()).await;
    Json(EngagementView::new(&days))
}

/// `GET /admin/api/retention` — Day 1/7/30 retention.
#[utoipa::path(
    get,
    path = "/admin/api/retention",
    tag = "Dashboard",
    summary = "Retention",
    responses(
        (status = 200, description = "Retention bars", body = RetentionView),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn retention(State(state): State<AppState>) -> Json<RetentionView> {
    Json(RetentionView::from(&state.dashboard.retention().await))
}

/// `GET /admin/api/streaks` — Streak distribution.
#[utoipa::path(
    get,
    path = "/admin/api/streaks",
    tag = "Dashboard",
    summary = "Streak distribution",
    responses(
        (status = 200, description = "Streak slices", body = StreakView),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn streaks(State(state): State<AppState>) -> Json<StreakView> {
    Json(StreakView::from(&state.dashboard.streaks().await))
}

/// `GET /admin/api/weekly` — This week against last week.
#[utoipa::path(
    get,
    path = "/admin/api/weekly",
    tag = "Dashboard",
    summary = "Week over week",
    responses(
        (status = 200, description = "Weekly comparison", body = WeeklyView),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn weekly(State(state): State<AppState>) -> Json<WeeklyView> {
    Json(WeeklyView::from(&state.dashboard.weekly(Utc::now()).await))
}

/// Dashboard routes, behind the session guard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/api/metrics", get(metrics))
        .route("/admin/api/metrics/{key}", get(metric))
        .route("/admin/api/funnel", get(funnel))
        .route("/admin/api/engagement", get(engagement))
        .route("/admin/api/retention", get(retention))
        .route("/admin/api/streaks", get(streaks))
        .route("/admin/api/weekly", get(weekly))
}
