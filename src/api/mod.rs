//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Public routes are `/health`, the login page and endpoint, and the
//! submission intake under `/api/v1`. Everything else under `/admin` sits
//! behind [`crate::auth::require_session`].

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::{Router, middleware};

use crate::app_state::AppState;
use crate::auth::require_session;

/// Builds the complete API router.
///
/// The session guard is a `route_layer` on the protected routes. A
/// catch-all under `/admin` is one of them, so unknown admin paths
/// redirect to the login page (or answer 401 under `/admin/api`) until a
/// session exists, and 404 after. Paths outside `/admin` answer 404.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let protected = handlers::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(protected)
        .merge(handlers::public_routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::event_names;
    use crate::llm::LanguageModel;
    use crate::persistence::{MemoryStore, SubmissionStore};
    use crate::test_support::{
        CannedModel, TEST_PASSWORD, TestHarness, event, failing_photos_state, test_state,
    };

    fn app(state: &AppState) -> Router {
        build_router(state).with_state(state.clone())
    }

    async fn send(state: &AppState, request: Request<Body>) -> Response {
        let Ok(response) = app(state).oneshot(request).await else {
            panic!("router is infallible");
        };
        response
    }

    async fn json_body(response: Response) -> Value {
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should read");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body should be JSON");
        };
        value
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let Ok(request) = builder.body(Body::empty()) else {
            panic!("request should build");
        };
        request
    }

    fn post_json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let Ok(request) = builder.body(Body::from(body.to_string())) else {
            panic!("request should build");
        };
        request
    }

    /// Logs in and returns the `name=value` part of the session cookie.
    async fn login(state: &AppState) -> String {
        let response = send(
            state,
            post_json(
                "/admin/api/login",
                &serde_json::json!({ "password": TEST_PASSWORD }),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let Some(cookie) = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        else {
            panic!("login should set a cookie");
        };
        let Some(pair) = cookie.split(';').next() else {
            panic!("cookie should have a value");
        };
        pair.to_string()
    }

    fn harness() -> TestHarness {
        test_state(MemoryStore::new(), None)
    }

    #[tokio::test]
    async fn health_is_public() {
        let h = harness();
        let response = send(&h.state, get("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_page_is_public() {
        let h = harness();
        let response = send(&h.state, get("/admin/login", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_without_session_is_unauthorized() {
        let h = harness();
        let response = send(&h.state, get("/admin/api/metrics", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dashboard_page_without_session_redirects_to_login() {
        let h = harness();
        let response = send(&h.state, get("/admin", None)).await;
        assert!(response.status().is_redirection());
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(location, Some("/admin/login"));
    }

    #[tokio::test]
    async fn unknown_admin_page_without_session_redirects_to_login() {
        let h = harness();
        let response = send(&h.state, get("/admin/settings", None)).await;
        assert!(response.status().is_redirection());
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(location, Some("/admin/login"));
    }

    #[tokio::test]
    async fn unknown_admin_api_path_without_session_is_unauthorized() {
        let h = harness();
        let response = send(&h.state, get("/admin/api/settings", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_admin_page_with_session_is_not_found() {
        let h = harness();
        let cookie = login(&h.state).await;
        let response = send(&h.state, get("/admin/settings", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let login_page = send(&h.state, get("/admin/login", None)).await;
        assert_eq!(login_page.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn paths_outside_admin_are_not_guarded() {
        let h = harness();
        let response = send(&h.state, get("/nowhere", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn forged_cookie_is_unauthorized() {
        let h = harness();
        let response = send(
            &h.state,
            get("/admin/api/metrics", Some("admin_session=abc.123.def")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let h = harness();
        let response = send(
            &h.state,
            post_json(
                "/admin/api/login",
                &serde_json::json!({ "password": "nope" }),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn malformed_login_body_is_bad_request() {
        let h = harness();
        let response = send(
            &h.state,
            post_json("/admin/api/login", &serde_json::json!({ "pw": 1 }), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_cookie_unlocks_metrics() {
        let h = test_state(MemoryStore::new(), None);
        h.store
            .push_events([event(event_names::APP_OPENED, Some("u1"), chrono::Utc::now())])
            .await;
        let cookie = login(&h.state).await;

        let response = send(&h.state, get("/admin/api/metrics", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let Some(cards) = body.get("metrics").and_then(Value::as_array) else {
            panic!("metrics array expected");
        };
        assert_eq!(cards.len(), 5);
    }

    #[tokio::test]
    async fn dashboard_snapshot_renders_every_widget() {
        let h = harness();
        let cookie = login(&h.state).await;
        let response = send(&h.state, get("/admin?baseline=first_stage", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        for widget in ["metrics", "funnel", "engagement", "retention", "streaks", "weekly"] {
            assert!(body.get(widget).is_some(), "missing {widget}");
        }
    }

    #[tokio::test]
    async fn unknown_metric_is_not_found() {
        let h = harness();
        let cookie = login(&h.state).await;
        let response = send(&h.state, get("/admin/api/metrics/bogus", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_funnel_baseline_is_bad_request() {
        let h = harness();
        let cookie = login(&h.state).await;
        let response = send(&h.state, get("/admin/api/funnel?baseline=median", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn funnel_baseline_is_case_insensitive() {
        let h = harness();
        let cookie = login(&h.state).await;
        let response = send(&h.state, get("/admin/api/funnel?baseline=FIRST", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_without_model_is_unavailable() {
        let h = harness();
        let cookie = login(&h.state).await;
        let response = send(
            &h.state,
            post_json(
                "/admin/api/chat",
                &serde_json::json!({ "message": "How are we doing?" }),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn chat_answers_with_model_reply() {
        let model: Arc<dyn LanguageModel> = Arc::new(CannedModel::replying("Looking good."));
        let h = test_state(MemoryStore::new(), Some(model));
        let cookie = login(&h.state).await;
        let response = send(
            &h.state,
            post_json(
                "/admin/api/chat",
                &serde_json::json!({ "message": "How are we doing?" }),
                Some(&cookie),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body.get("response").and_then(Value::as_str),
            Some("Looking good.")
        );
    }

    #[tokio::test]
    async fn logout_clears_the_cookie() {
        let h = harness();
        let cookie = login(&h.state).await;
        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/admin/api/logout")
            .header(COOKIE, &cookie)
            .body(Body::empty())
        else {
            panic!("request should build");
        };
        let response = send(&h.state, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("Max-Age=0"));
        assert!(cleared);
    }

    const BOUNDARY: &str = "vowdash-test-boundary";

    fn multipart_body(fields: &[(&str, &str)], photo: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, content_type, bytes)) = photo {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; \
                     filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post_multipart(body: Vec<u8>) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/v1/submissions")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
        else {
            panic!("request should build");
        };
        request
    }

    const VALID_FIELDS: [(&str, &str); 5] = [
        ("coupleNames", "Sarah & Michael"),
        ("weddingDate", "2025-09-20"),
        ("weddingLocation", "Napa Valley"),
        ("favoriteDetail", "The sparklers"),
        ("termsAccepted", "true"),
    ];

    #[tokio::test]
    async fn submission_with_photo_is_created() {
        let h = harness();
        let body = multipart_body(
            &VALID_FIELDS,
            Some(("first dance.jpg", "image/jpeg", b"\xff\xd8\xff")),
        );
        let response = send(&h.state, post_multipart(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("pending"));
        assert_eq!(body.get("photo_count").and_then(Value::as_u64), Some(1));
        assert_eq!(h.photos.len().await, 1);

        let Ok(rows) = h.store.list_submissions(None).await else {
            panic!("list failed");
        };
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn failed_photo_upload_is_bad_gateway_and_stores_nothing() {
        let store = Arc::new(MemoryStore::new());
        let state = failing_photos_state(Arc::clone(&store));
        let body = multipart_body(
            &VALID_FIELDS,
            Some(("first dance.jpg", "image/jpeg", b"\xff\xd8\xff")),
        );
        let response = send(&state, post_multipart(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let Ok(rows) = store.list_submissions(None).await else {
            panic!("list failed");
        };
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn submission_without_terms_is_rejected() {
        let h = harness();
        let fields: Vec<(&str, &str)> = VALID_FIELDS
            .iter()
            .copied()
            .filter(|(name, _)| *name != "termsAccepted")
            .collect();
        let response = send(&h.state, post_multipart(multipart_body(&fields, None))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let Ok(rows) = h.store.list_submissions(None).await else {
            panic!("list failed");
        };
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn submission_list_requires_session_and_filters() {
        let h = harness();
        let Ok(_) = h
            .store
            .insert_submission(crate::test_support::new_submission("A & B"))
            .await
        else {
            panic!("insert failed");
        };

        let response = send(&h.state, get("/admin/api/submissions", None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let cookie = login(&h.state).await;
        let response = send(
            &h.state,
            get("/admin/api/submissions?status=approved", Some(&cookie)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body.pointer("/stats/total").and_then(Value::as_u64),
            Some(1)
        );
        assert_eq!(
            body.get("data").and_then(Value::as_array).map(Vec::len),
            Some(0)
        );
    }
}
