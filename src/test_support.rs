//! Fixtures shared by unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tokio::sync::Mutex;

use crate::analytics::FunnelBaseline;
use crate::app_state::{AppState, ServiceSettings};
use crate::auth::SessionSigner;
use crate::domain::{
    Event, NewSubmission, NewSummary, PeriodType, Submission, Summary, event_names,
};
use crate::error::AdminError;
use crate::llm::{CompletionRequest, LanguageModel};
use crate::persistence::{
    EventQuery, EventStore, MemoryStore, Stores, SubmissionStore, SummaryStore,
};
use crate::photos::{MemoryObjectStore, ObjectStore};

/// Password accepted by [`test_state`].
pub const TEST_PASSWORD: &str = "let-me-in";

/// Fixed "current time": 2025-06-15 10:30 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Noon UTC on 2025-03-`n`.
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, n, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// An event with an optional user.
pub fn event(name: &str, user: Option<&str>, at: DateTime<Utc>) -> Event {
    let event = Event::new(name, at);
    match user {
        Some(user) => event.with_user(user),
        None => event,
    }
}

/// An `onboarding_screen_viewed` event.
pub fn screen_view(screen: &str, user: Option<&str>, at: DateTime<Utc>) -> Event {
    event(event_names::ONBOARDING_SCREEN_VIEWED, user, at).with_screen(screen)
}

/// A `streak_updated` event reporting `current_streak`.
pub fn streak(user: &str, current_streak: u64, at: DateTime<Utc>) -> Event {
    Event::new(event_names::STREAK_UPDATED, at)
        .with_user(user)
        .with_data(serde_json::json!({ "current_streak": current_streak }))
}

/// A complete submission form for `couple_names`.
pub fn new_submission(couple_names: &str) -> NewSubmission {
    NewSubmission {
        couple_names: couple_names.to_string(),
        couple_instagram: Some("@thecouple".to_string()),
        wedding_date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap_or_default(),
        wedding_location: "Napa Valley, CA".to_string(),
        vendor_instagrams: None,
        favorite_detail: Some("The tented reception".to_string()),
        photo_urls: Vec::new(),
        terms_accepted: true,
    }
}

/// Language model returning a fixed reply and recording what it was sent.
#[derive(Debug, Default)]
pub struct CannedModel {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl CannedModel {
    /// Always answers `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl LanguageModel for CannedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AdminError> {
        self.requests.lock().await.push(request);
        Ok(self.reply.clone())
    }

    fn max_tokens(&self) -> u32 {
        1024
    }
}

/// A store whose every call fails.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl EventStore for FailingStore {
    async fn query_events(&self, _query: &EventQuery) -> Result<Vec<Event>, AdminError> {
        Err(AdminError::Store("connection refused".to_string()))
    }
}

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn insert_submission(
        &self,
        _submission: NewSubmission,
    ) -> Result<Submission, AdminError> {
        Err(AdminError::Store("connection refused".to_string()))
    }

    async fn list_submissions(&self, _limit: Option<i64>) -> Result<Vec<Submission>, AdminError> {
        Err(AdminError::Store("connection refused".to_string()))
    }
}

#[async_trait]
impl SummaryStore for FailingStore {
    async fn insert_summary(&self, _summary: NewSummary) -> Result<Summary, AdminError> {
        Err(AdminError::Store("connection refused".to_string()))
    }

    async fn latest_summary(
        &self,
        _period_type: PeriodType,
        _since: NaiveDate,
    ) -> Result<Option<Summary>, AdminError> {
        Err(AdminError::Store("connection refused".to_string()))
    }
}

/// An object store whose every upload fails.
#[derive(Debug, Default)]
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn upload(
        &self,
        _key: &str,
        _content_type: &str,
        _bytes: axum::body::Bytes,
    ) -> Result<(), AdminError> {
        Err(AdminError::ObjectStorage("bucket unavailable".to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        format!("failing://{key}")
    }
}

/// A session signer accepting [`TEST_PASSWORD`].
#[allow(clippy::panic)]
pub fn test_signer() -> SessionSigner {
    let Ok(signer) =
        SessionSigner::new(b"test-session-secret", Some(TEST_PASSWORD.to_string()), 3600, false)
    else {
        panic!("test signer should build");
    };
    signer
}

/// Handles to the fakes behind a [`test_state`].
#[derive(Debug)]
pub struct TestHarness {
    /// State to hand to services or the router.
    pub state: AppState,
    /// The backing store.
    pub store: Arc<MemoryStore>,
    /// The photo bucket.
    pub photos: Arc<MemoryObjectStore>,
}

/// App state over a memory store, a memory bucket, and `llm` if given.
pub fn test_state(store: MemoryStore, llm: Option<Arc<dyn LanguageModel>>) -> TestHarness {
    let store = Arc::new(store);
    let photos = Arc::new(MemoryObjectStore::new());
    let object_store: Arc<dyn ObjectStore> = Arc::<MemoryObjectStore>::clone(&photos);
    let state = AppState::new(
        Stores::shared(Arc::<MemoryStore>::clone(&store)),
        Some(object_store),
        llm,
        test_signer(),
        ServiceSettings {
            app_name: "Daily I Do".to_string(),
            funnel_baseline: FunnelBaseline::MaxCount,
        },
    );
    TestHarness {
        state,
        store,
        photos,
    }
}

/// App state over `store` whose photo uploads always fail.
pub fn failing_photos_state(store: Arc<MemoryStore>) -> AppState {
    AppState::new(
        Stores::shared(store),
        Some(Arc::new(FailingObjectStore)),
        None,
        test_signer(),
        ServiceSettings {
            app_name: "Daily I Do".to_string(),
            funnel_baseline: FunnelBaseline::MaxCount,
        },
    )
}

/// App state whose every store call fails.
pub fn failing_state(llm: Option<Arc<dyn LanguageModel>>) -> AppState {
    AppState::new(
        Stores::shared(Arc::new(FailingStore)),
        None,
        llm,
        test_signer(),
        ServiceSettings {
            app_name: "Daily I Do".to_string(),
            funnel_baseline: FunnelBaseline::MaxCount,
        },
    )
}
