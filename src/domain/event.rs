//! Analytics events reported by the mobile app.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Event names the dashboard reads.
pub mod event_names {
    /// App brought to the foreground.
    pub const APP_OPENED: &str = "app_opened";
    /// A daily tip was opened.
    pub const TIP_VIEWED: &str = "tip_viewed";
    /// A checklist item was ticked off.
    pub const CHECKLIST_ITEM_COMPLETED: &str = "checklist_item_completed";
    /// First onboarding screen shown.
    pub const ONBOARDING_STARTED: &str = "onboarding_started";
    /// Onboarding finished.
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
    /// One onboarding screen shown; `screen_name` carries the screen key.
    pub const ONBOARDING_SCREEN_VIEWED: &str = "onboarding_screen_viewed";
    /// Streak recomputed; payload carries `current_streak`.
    pub const STREAK_UPDATED: &str = "streak_updated";
    /// User came back one day after onboarding.
    pub const DAY_1_RETURN: &str = "day_1_return";
    /// User came back seven days after onboarding.
    pub const DAY_7_RETURN: &str = "day_7_return";
    /// User came back thirty days after onboarding.
    pub const DAY_30_RETURN: &str = "day_30_return";

    /// Events plotted on the daily engagement chart.
    pub const ENGAGEMENT: [&str; 3] = [APP_OPENED, TIP_VIEWED, CHECKLIST_ITEM_COMPLETED];
}

/// One row of the append-only `analytics_events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Auto-increment row ID (0 for events not yet stored).
    pub id: i64,
    /// Event name, see [`event_names`].
    pub event_name: String,
    /// Anonymous app user, when the client knew one.
    pub user_id: Option<String>,
    /// Screen the event was raised on.
    pub screen_name: Option<String>,
    /// Free-form payload. Older clients send it as a JSON-encoded string.
    pub event_data: Option<serde_json::Value>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event with no user, screen, or payload.
    #[must_use]
    pub fn new(event_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            event_name: event_name.into(),
            user_id: None,
            screen_name: None,
            event_data: None,
            created_at,
        }
    }

    /// Sets the user ID.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the screen name.
    #[must_use]
    pub fn with_screen(mut self, screen_name: impl Into<String>) -> Self {
        self.screen_name = Some(screen_name.into());
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.event_data = Some(data);
        self
    }

    /// Returns `true` if this event has the given name.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.event_name == name
    }

    /// Returns the user ID if present and non-empty.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns the screen name if present and non-empty.
    #[must_use]
    pub fn screen(&self) -> Option<&str> {
        self.screen_name.as_deref().filter(|s| !s.is_empty())
    }

    /// UTC calendar date of `created_at`.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Returns the payload as a JSON value, decoding string-encoded payloads.
    ///
    /// A string that is not valid JSON yields `None`.
    #[must_use]
    pub fn payload(&self) -> Option<Cow<'_, serde_json::Value>> {
        match self.event_data.as_ref()? {
            serde_json::Value::String(raw) => serde_json::from_str(raw).ok().map(Cow::Owned),
            serde_json::Value::Null => None,
            other => Some(Cow::Borrowed(other)),
        }
    }

    /// Reads a non-negative number from the payload.
    ///
    /// Accepts JSON numbers and numeric strings. Fractions are kept as is.
    #[must_use]
    pub fn payload_number(&self, field: &str) -> Option<f64> {
        let payload = self.payload()?;
        let value = match payload.get(field)? {
            serde_json::Value::Number(n) => n.as_f64()?,
            serde_json::Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        (value.is_finite() && value >= 0.0).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn payload_accepts_objects_and_encoded_strings() {
        let object = Event::new(event_names::STREAK_UPDATED, at())
            .with_data(json!({ "current_streak": 4 }));
        let encoded = Event::new(event_names::STREAK_UPDATED, at())
            .with_data(json!("{\"current_streak\": 9}"));

        assert_eq!(object.payload_number("current_streak"), Some(4.0));
        assert_eq!(encoded.payload_number("current_streak"), Some(9.0));
    }

    #[test]
    fn payload_keeps_fractions() {
        let fractional = Event::new(event_names::STREAK_UPDATED, at())
            .with_data(json!({ "current_streak": 3.5 }));
        let text = Event::new(event_names::STREAK_UPDATED, at())
            .with_data(json!({ "current_streak": " 2.25 " }));

        assert_eq!(fractional.payload_number("current_streak"), Some(3.5));
        assert_eq!(text.payload_number("current_streak"), Some(2.25));
    }

    #[test]
    fn payload_rejects_garbage() {
        let garbage = Event::new(event_names::STREAK_UPDATED, at()).with_data(json!("not json"));
        let negative = Event::new(event_names::STREAK_UPDATED, at())
            .with_data(json!({ "current_streak": -2 }));
        let missing = Event::new(event_names::STREAK_UPDATED, at());

        assert_eq!(garbage.payload_number("current_streak"), None);
        assert_eq!(negative.payload_number("current_streak"), None);
        assert_eq!(missing.payload_number("current_streak"), None);
    }

    #[test]
    fn blank_user_is_treated_as_missing() {
        let event = Event::new(event_names::APP_OPENED, at()).with_user("");
        assert_eq!(event.user(), None);
    }

    #[test]
    fn day_uses_utc_date() {
        let late = Utc
            .with_ymd_and_hms(2025, 3, 1, 23, 59, 59)
            .single()
            .unwrap_or_default();
        let event = Event::new(event_names::APP_OPENED, late);
        assert_eq!(event.day(), late.date_naive());
    }
}
