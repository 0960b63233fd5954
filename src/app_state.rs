//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::analytics::FunnelBaseline;
use crate::auth::SessionSigner;
use crate::llm::LanguageModel;
use crate::persistence::Stores;
use crate::photos::ObjectStore;
use crate::service::{DashboardService, InsightService, SubmissionService};

/// Settings the services read at request time.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// App name used in prompts.
    pub app_name: String,
    /// Default funnel baseline.
    pub funnel_baseline: FunnelBaseline,
}

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dashboard widgets.
    pub dashboard: Arc<DashboardService>,
    /// Weekly summary and chat.
    pub insights: Arc<InsightService>,
    /// Submission intake and moderation list.
    pub submissions: Arc<SubmissionService>,
    /// Admin session issuing and verification.
    pub sessions: Arc<SessionSigner>,
}

impl AppState {
    /// Wires the services over explicitly constructed backends.
    ///
    /// `photos` and `llm` are `None` when their configuration is missing;
    /// the features depending on them then answer 503.
    #[must_use]
    pub fn new(
        stores: Stores,
        photos: Option<Arc<dyn ObjectStore>>,
        llm: Option<Arc<dyn LanguageModel>>,
        sessions: SessionSigner,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            dashboard: Arc::new(DashboardService::new(
                Arc::clone(&stores.events),
                settings.funnel_baseline,
            )),
            insights: Arc::new(InsightService::new(stores.clone(), llm, settings.app_name)),
            submissions: Arc::new(SubmissionService::new(stores.submissions, photos)),
            sessions: Arc::new(sessions),
        }
    }
}
