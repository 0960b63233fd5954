//! Weekly summary and chat handlers.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{ChatRequest, ChatResponse, LatestSummaryResponse, SummaryResponse};
use crate::app_state::AppState;
use crate::error::{AdminError, ErrorResponse};

/// `GET /admin/api/summary` — Latest weekly summary.
#[utoipa::path(
    get,
    path = "/admin/api/summary",
    tag = "Insights",
    summary = "Latest weekly summary",
    description = "Newest weekly summary whose period started within the last seven days.",
    responses(
        (status = 200, description = "Latest summary or null", body = LatestSummaryResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn latest_summary(State(state): State<AppState>) -> Json<LatestSummaryResponse> {
    let summary = state.insights.latest_summary(Utc::now()).await;
    Json(LatestSummaryResponse {
        summary: summary.map(SummaryResponse::from),
    })
}

/// `POST /admin/api/summary` — Generate this week's summary.
///
/// # Errors
///
/// Returns [`AdminError::NotConfigured`] without an API key and
/// [`AdminError::Llm`] or [`AdminError::Store`] when generation fails.
#[utoipa::path(
    post,
    path = "/admin/api/summary",
    tag = "Insights",
    summary = "Generate weekly summary",
    description = "Compares this week with last week, asks the language model for a summary and stores it.",
    responses(
        (status = 200, description = "Generated summary", body = SummaryResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 502, description = "Language model failed", body = ErrorResponse),
        (status = 503, description = "AI summary not configured", body = ErrorResponse),
    )
)]
pub async fn generate_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AdminError> {
    let summary = state.insights.generate_summary(Utc::now()).await?;
    Ok(Json(summary.into()))
}

/// `POST /admin/api/chat` — Ask a question about the analytics.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a malformed body or blank
/// question, [`AdminError::NotConfigured`] without an API key, and
/// [`AdminError::Llm`] when the model fails.
#[utoipa::path(
    post,
    path = "/admin/api/chat",
    tag = "Insights",
    summary = "Analytics chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer", body = ChatResponse),
        (status = 400, description = "Blank or malformed question", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 502, description = "Language model failed", body = ErrorResponse),
        (status = 503, description = "AI chat not configured", body = ErrorResponse),
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AdminError> {
    let Json(req) = body.map_err(|e| AdminError::InvalidRequest(e.body_text()))?;
    let response = state.insights.chat(&req.message, Utc::now()).await?;
    Ok(Json(ChatResponse { response }))
}

/// Insight routes, behind the session guard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/api/summary", get(latest_summary).post(generate_summary))
        .route("/admin/api/chat", post(chat))
}
