//! Dashboard widget DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::analytics::FunnelBaseline;
use crate::report::{
    EngagementView, FunnelView, MetricCardView, RetentionView, StreakView, WeeklyView,
};
use crate::service::DashboardSnapshot;

/// Query parameters for the funnel.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FunnelParams {
    /// `max` (largest stage is 100%) or `first` (first stage is 100%).
    /// Defaults to the configured strategy.
    pub baseline: Option<FunnelBaseline>,
}

/// Headline metric cards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricsResponse {
    /// Cards in display order.
    pub metrics: Vec<MetricCardView>,
}

/// Every widget in one document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// When the document was computed.
    pub generated_at: DateTime<Utc>,
    /// Headline cards.
    pub metrics: Vec<MetricCardView>,
    /// Onboarding funnel.
    pub funnel: FunnelView,
    /// Daily engagement chart.
    pub engagement: EngagementView,
    /// Retention chart.
    pub retention: RetentionView,
    /// Streak pie.
    pub streaks: StreakView,
    /// Week-over-week table.
    pub weekly: WeeklyView,
}

impl DashboardResponse {
    /// Renders a snapshot.
    #[must_use]
    pub fn render(snapshot: &DashboardSnapshot, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            metrics: snapshot
                .metrics
                .metrics
                .iter()
                .copied()
                .map(MetricCardView::from)
                .collect(),
            funnel: FunnelView::from(&snapshot.funnel),
            engagement: EngagementView::new(&snapshot.engagement),
            retention: RetentionView::from(&snapshot.retention),
            streaks: StreakView::from(&snapshot.streaks),
            weekly: WeeklyView::from(&snapshot.weekly),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;

    use super::*;

    fn baseline(query: &str) -> Option<FunnelBaseline> {
        let Ok(uri) = format!("/admin/api/funnel?{query}").parse::<Uri>() else {
            panic!("uri should parse");
        };
        let Ok(Query(params)) = Query::<FunnelParams>::try_from_uri(&uri) else {
            panic!("{query} should deserialize");
        };
        params.baseline
    }

    #[test]
    fn baseline_accepts_every_configured_spelling() {
        assert_eq!(baseline("baseline=first"), Some(FunnelBaseline::FirstStage));
        assert_eq!(baseline("baseline=FIRST"), Some(FunnelBaseline::FirstStage));
        assert_eq!(baseline("baseline=first_stage"), Some(FunnelBaseline::FirstStage));
        assert_eq!(baseline("baseline=Max"), Some(FunnelBaseline::MaxCount));
        assert_eq!(baseline(""), None);
    }

    #[test]
    fn unknown_baseline_is_rejected() {
        let Ok(uri) = "/admin/api/funnel?baseline=median".parse::<Uri>() else {
            panic!("uri should parse");
        };
        assert!(Query::<FunnelParams>::try_from_uri(&uri).is_err());
    }
}
