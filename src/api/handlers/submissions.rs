//! Submission intake and moderation list handlers.

use axum::extract::multipart::Field;
use axum::extract::rejection::QueryRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{SubmissionCreatedResponse, SubmissionListParams, SubmissionListResponse};
use crate::app_state::AppState;
use crate::error::{AdminError, ErrorResponse};
use crate::service::{PhotoUpload, SubmissionForm};

/// Largest accepted form body, photos included.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

fn multipart_error(err: impl std::fmt::Display) -> AdminError {
    AdminError::InvalidRequest(format!("malformed form: {err}"))
}

async fn text(field: Field<'_>) -> Result<Option<String>, AdminError> {
    field.text().await.map(Some).map_err(multipart_error)
}

/// Reads the multipart parts into a [`SubmissionForm`]. Unknown parts are
/// ignored.
async fn read_form(mut multipart: Multipart) -> Result<SubmissionForm, AdminError> {
    let mut form = SubmissionForm::default();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "coupleNames" => form.couple_names = text(field).await?,
            "coupleInstagram" => form.couple_instagram = text(field).await?,
            "weddingDate" => form.wedding_date = text(field).await?,
            "weddingLocation" => form.wedding_location = text(field).await?,
            "vendorInstagrams" => form.vendor_instagrams = text(field).await?,
            "favoriteDetail" => form.favorite_detail = text(field).await?,
            "termsAccepted" => {
                let value = text(field).await?.unwrap_or_default();
                form.terms_accepted = matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "true" | "on" | "1" | "yes"
                );
            }
            "photos" => {
                let file_name = field.file_name().unwrap_or("photo").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if bytes.is_empty() {
                    continue;
                }
                form.photos.push(PhotoUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }
    Ok(form)
}

/// `POST /api/v1/submissions` — Submit a real wedding.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for a malformed form, missing
/// fields, or unaccepted terms, and [`AdminError::ObjectStorage`] when a
/// photo upload fails.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    tag = "Submissions",
    summary = "Submit a real wedding",
    description = "Multipart form with `coupleNames`, `coupleInstagram`, `weddingDate` (YYYY-MM-DD), `weddingLocation`, `vendorInstagrams`, `favoriteDetail`, `termsAccepted` and any number of `photos` files. Only image files are kept.",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submission stored as pending", body = SubmissionCreatedResponse),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 502, description = "Photo upload failed", body = ErrorResponse),
        (status = 503, description = "Photo storage not configured", body = ErrorResponse),
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AdminError> {
    let form = read_form(multipart).await?;
    let submission = state.submissions.submit(form, Utc::now()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionCreatedResponse::from(&submission)),
    ))
}

/// `GET /admin/api/submissions` — Moderation list.
///
/// # Errors
///
/// Returns [`AdminError::InvalidRequest`] for an unknown status filter.
#[utoipa::path(
    get,
    path = "/admin/api/submissions",
    tag = "Submissions",
    summary = "List submissions",
    description = "Status counts over every submission plus the rows matching `status`, newest first.",
    params(SubmissionListParams),
    responses(
        (status = 200, description = "Submissions", body = SubmissionListResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
    )
)]
pub async fn list_submissions(
    State(state): State<AppState>,
    params: Result<Query<SubmissionListParams>, QueryRejection>,
) -> Result<Json<SubmissionListResponse>, AdminError> {
    let Query(params) = params.map_err(|e| AdminError::InvalidRequest(e.body_text()))?;
    let listing = state.submissions.list(params.status_filter()?).await;
    Ok(Json(SubmissionListResponse::from(&listing)))
}

/// Public intake route under `/api/v1`.
pub fn public_routes() -> Router<AppState> {
    Router::new().route(
        "/submissions",
        post(create_submission).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}

/// Moderation route, behind the session guard.
pub fn routes() -> Router<AppState> {
    Router::new().route("/admin/api/submissions", get(list_submissions))
}
