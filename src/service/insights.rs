//! Weekly summary generation and the analytics chat.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::fetch_or_empty;
use crate::analytics::{WeeklyReport, screen_users};
use crate::domain::{NewSummary, PeriodType, Summary, TimeWindow, event_names};
use crate::error::AdminError;
use crate::llm::prompt::{chat_context, weekly_summary_prompt};
use crate::llm::{CompletionRequest, LanguageModel};
use crate::persistence::{EventQuery, Stores};

/// Reply used when the model answers a chat question with nothing.
pub const EMPTY_CHAT_REPLY: &str = "Unable to generate response";

const RECENT_EVENT_LIMIT: i64 = 500;
const RECENT_SUBMISSION_LIMIT: i64 = 50;

/// Drives the language model over the stored analytics.
#[derive(Debug, Clone)]
pub struct InsightService {
    stores: Stores,
    llm: Option<Arc<dyn LanguageModel>>,
    app_name: String,
}

impl InsightService {
    /// Creates a new `InsightService`. `llm` is `None` when no API key is
    /// configured.
    #[must_use]
    pub fn new(stores: Stores, llm: Option<Arc<dyn LanguageModel>>, app_name: String) -> Self {
        Self {
            stores,
            llm,
            app_name,
        }
    }

    fn model(&self, feature: &str) -> Result<&dyn LanguageModel, AdminError> {
        self.llm.as_deref().ok_or_else(|| {
            AdminError::NotConfigured(format!(
                "AI {feature} is not configured. Please add ANTHROPIC_API_KEY to your environment variables."
            ))
        })
    }

    /// Generates, stores, and returns this week's summary.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotConfigured`] without an API key,
    /// [`AdminError::Llm`] when the model fails or replies with nothing,
    /// and [`AdminError::Store`] when the summary cannot be saved.
    pub async fn generate_summary(&self, now: DateTime<Utc>) -> Result<Summary, AdminError> {
        let model = self.model("summary")?;

        let window = TimeWindow::since(now - Duration::days(14));
        let events = fetch_or_empty(
            self.stores.events.as_ref(),
            &EventQuery::all().within(window),
            "weekly summary",
        )
        .await;
        let report = WeeklyReport::from_events(&events, now);

        let prompt = weekly_summary_prompt(&self.app_name, &report.this_week, &report.last_week);
        let text = model
            .complete(CompletionRequest::new(prompt, model.max_tokens()))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "summary generation failed"))?;
        if text.trim().is_empty() {
            tracing::error!("model returned an empty summary");
            return Err(AdminError::Llm("empty summary".to_string()));
        }

        let today = now.date_naive();
        let summary = self
            .stores
            .summaries
            .insert_summary(NewSummary {
                period_type: PeriodType::Weekly,
                period_start: today - Duration::days(7),
                period_end: today,
                summary_text: text,
                key_metrics: json!({
                    "active_users": report.this_week.active_users,
                    "tips_viewed": report.this_week.tips_viewed,
                    "onboarding_rate": report.this_week.completion_rate,
                }),
            })
            .await?;

        tracing::info!(
            summary_id = %summary.id,
            active_users = report.this_week.active_users,
            "weekly summary stored"
        );
        Ok(summary)
    }

    /// Newest weekly summary covering the last seven days, if any.
    pub async fn latest_summary(&self, now: DateTime<Utc>) -> Option<Summary> {
        let since = now.date_naive() - Duration::days(7);
        match self
            .stores
            .summaries
            .latest_summary(PeriodType::Weekly, since)
            .await
        {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(error = %err, "summary lookup failed");
                None
            }
        }
    }

    /// Answers a question about recent analytics.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for a blank question,
    /// [`AdminError::NotConfigured`] without an API key, and
    /// [`AdminError::Llm`] when the model call fails.
    pub async fn chat(&self, question: &str, now: DateTime<Utc>) -> Result<String, AdminError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AdminError::InvalidRequest("message is required".to_string()));
        }
        let model = self.model("chat")?;

        let recent_query = EventQuery::all()
            .within(TimeWindow::last_days(now, 7))
            .newest_first()
            .limit(RECENT_EVENT_LIMIT);
        let funnel_query = EventQuery::all()
            .named([event_names::ONBOARDING_SCREEN_VIEWED])
            .within(TimeWindow::last_days(now, 30));

        let (recent, funnel_events, submissions) = tokio::join!(
            fetch_or_empty(self.stores.events.as_ref(), &recent_query, "chat recent events"),
            fetch_or_empty(self.stores.events.as_ref(), &funnel_query, "chat funnel"),
            self.stores
                .submissions
                .list_submissions(Some(RECENT_SUBMISSION_LIMIT)),
        );
        let submissions = submissions.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "submission fetch failed; using empty result");
            Vec::new()
        });

        let context = chat_context(
            &self.app_name,
            &recent,
            &screen_users(&funnel_events),
            &submissions,
        );
        let reply = model
            .complete(CompletionRequest::new(question, model.max_tokens()).with_system(context))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "chat completion failed"))?;

        if reply.trim().is_empty() {
            return Ok(EMPTY_CHAT_REPLY.to_string());
        }
        Ok(reply)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, SubmissionStore, SummaryStore};
    use crate::test_support::{CannedModel, event, new_submission, now, screen_view};

    fn service_with(store: Arc<MemoryStore>, model: Option<Arc<CannedModel>>) -> InsightService {
        let llm = model.map(|m| m as Arc<dyn LanguageModel>);
        InsightService::new(Stores::shared(store), llm, "Daily I Do".to_string())
    }

    #[tokio::test]
    async fn summary_is_generated_and_stored() {
        let store = Arc::new(MemoryStore::with_events(vec![
            event(event_names::ONBOARDING_STARTED, Some("u1"), now() - Duration::days(1)),
            event(event_names::ONBOARDING_COMPLETED, Some("u1"), now() - Duration::days(1)),
            event(event_names::TIP_VIEWED, Some("u2"), now() - Duration::days(2)),
        ]));
        let model = Arc::new(CannedModel::replying("**HIGHLIGHTS** ↑ more users"));
        let service = service_with(Arc::clone(&store), Some(Arc::clone(&model)));

        let Ok(summary) = service.generate_summary(now()).await else {
            panic!("summary should be generated");
        };
        assert_eq!(summary.summary_text, "**HIGHLIGHTS** ↑ more users");
        assert_eq!(summary.period_end, now().date_naive());
        assert_eq!(summary.period_start, now().date_naive() - Duration::days(7));
        assert_eq!(summary.key_metrics.get("active_users"), Some(&json!(2)));
        assert_eq!(summary.key_metrics.get("onboarding_rate"), Some(&json!(100)));

        let requests = model.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests.iter().all(|r| r.system.is_none()));

        let Ok(Some(stored)) = store
            .latest_summary(PeriodType::Weekly, now().date_naive() - Duration::days(7))
            .await
        else {
            panic!("summary should be stored");
        };
        assert_eq!(stored.id, summary.id);
        assert_eq!(service.latest_summary(now()).await.map(|s| s.id), Some(summary.id));
    }

    #[tokio::test]
    async fn empty_summary_is_rejected_and_not_stored() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with(
            Arc::clone(&store),
            Some(Arc::new(CannedModel::replying("   "))),
        );
        assert!(matches!(
            service.generate_summary(now()).await,
            Err(AdminError::Llm(_))
        ));
        assert!(service.latest_summary(now()).await.is_none());
    }

    #[tokio::test]
    async fn missing_model_is_not_configured() {
        let service = service_with(Arc::new(MemoryStore::new()), None);
        let Err(AdminError::NotConfigured(message)) = service.generate_summary(now()).await else {
            panic!("expected NotConfigured");
        };
        assert!(message.starts_with("AI summary is not configured"));
        assert!(matches!(
            service.chat("how are we doing?", now()).await,
            Err(AdminError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn chat_sends_context_as_system_prompt() {
        let store = Arc::new(MemoryStore::with_events(vec![
            event(event_names::TIP_VIEWED, Some("u1"), now() - Duration::days(1)),
            screen_view("intro", Some("u1"), now() - Duration::days(10)),
            screen_view("welcome", None, now() - Duration::days(9)),
            screen_view("welcome", None, now() - Duration::days(8)),
        ]));
        let Ok(_) = store.insert_submission(new_submission("A & B")).await else {
            panic!("insert failed");
        };
        let model = Arc::new(CannedModel::replying("Tips are trending up."));
        let service = service_with(Arc::clone(&store), Some(Arc::clone(&model)));

        let Ok(reply) = service.chat("  What changed?  ", now()).await else {
            panic!("chat should answer");
        };
        assert_eq!(reply, "Tips are trending up.");

        let requests = model.requests().await;
        let Some(request) = requests.first() else {
            panic!("model should be called");
        };
        assert_eq!(request.user, "What changed?");
        let Some(system) = &request.system else {
            panic!("system prompt expected");
        };
        assert!(system.contains("- tip_viewed: 1"));
        assert!(system.contains("intro: 1 users"));
        assert!(system.contains("welcome: 0 users"));
        assert!(system.contains("Total: 1\nPending: 1"));
    }

    #[tokio::test]
    async fn chat_rejects_blank_questions_and_fills_empty_replies() {
        let service = service_with(
            Arc::new(MemoryStore::new()),
            Some(Arc::new(CannedModel::replying(""))),
        );
        assert!(matches!(
            service.chat("   ", now()).await,
            Err(AdminError::InvalidRequest(_))
        ));
        let Ok(reply) = service.chat("anything?", now()).await else {
            panic!("chat should answer");
        };
        assert_eq!(reply, EMPTY_CHAT_REPLY);
    }
}
