//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use crate::analytics::{FunnelBaseline, MetricKey, WeeklyMetrics};
use crate::api::dto::{
    ChatRequest, ChatResponse, DashboardResponse, LatestSummaryResponse, LoginRequest,
    LoginResponse, LogoutResponse, MetricsResponse, SubmissionCreatedResponse,
    SubmissionListResponse, SummaryResponse,
};
use crate::api::handlers::{auth, dashboard, insights, submissions, system};
use crate::error::ErrorResponse;
use crate::report::Tone;
use crate::report::views::{
    DeltaView, EngagementPointView, EngagementSeries, EngagementView, FunnelBarView, FunnelView,
    MetricCardView, RetentionBarView, RetentionView, StatusBadge, StreakSliceView, StreakView,
    SubmissionRowView, SubmissionStats, WeeklyView,
};

/// Generated API description, served by Swagger UI when the
/// `swagger-ui` feature is on.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "vowdash",
        description = "Analytics dashboard and submission intake for the Daily I Do app"
    ),
    paths(
        system::health_handler,
        system::login_page,
        auth::login,
        auth::logout,
        dashboard::dashboard,
        dashboard::metrics,
        dashboard::metric,
        dashboard::funnel,
        dashboard::engagement,
        dashboard::retention,
        dashboard::streaks,
        dashboard::weekly,
        insights::latest_summary,
        insights::generate_summary,
        insights::chat,
        submissions::create_submission,
        submissions::list_submissions,
    ),
    components(schemas(
        system::HealthResponse,
        ErrorResponse,
        LoginRequest,
        LoginResponse,
        LogoutResponse,
        MetricsResponse,
        DashboardResponse,
        SummaryResponse,
        LatestSummaryResponse,
        ChatRequest,
        ChatResponse,
        SubmissionCreatedResponse,
        SubmissionListResponse,
        FunnelBaseline,
        MetricKey,
        WeeklyMetrics,
        Tone,
        MetricCardView,
        FunnelBarView,
        FunnelView,
        EngagementPointView,
        EngagementSeries,
        EngagementView,
        RetentionBarView,
        RetentionView,
        StreakSliceView,
        StreakView,
        DeltaView,
        WeeklyView,
        StatusBadge,
        SubmissionStats,
        SubmissionRowView,
    )),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Auth", description = "Admin login and logout"),
        (name = "Dashboard", description = "Analytics widgets"),
        (name = "Insights", description = "AI weekly summary and chat"),
        (name = "Submissions", description = "Real wedding intake and moderation"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/admin/api/login",
            "/admin/api/metrics/{key}",
            "/admin/api/summary",
            "/api/v1/submissions",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
