//! Onboarding funnel: distinct users per screen, dropoff, and conversion.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, event_names};

/// One named stage of a funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    /// `screen_name` reported by the app.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// Onboarding screens in the order the app shows them.
pub const ONBOARDING_SCREENS: [FunnelStage; 14] = [
    FunnelStage { key: "intro", label: "Intro" },
    FunnelStage { key: "welcome", label: "Welcome" },
    FunnelStage { key: "your_name", label: "Your Name" },
    FunnelStage { key: "partner_name", label: "Partner Name" },
    FunnelStage { key: "couple_photo", label: "Couple Photo" },
    FunnelStage { key: "wedding_date", label: "Wedding Date" },
    FunnelStage { key: "wedding_location", label: "Location" },
    FunnelStage { key: "tented_question", label: "Tented Question" },
    FunnelStage { key: "notifications_permission", label: "Notifications" },
    FunnelStage { key: "preparedness", label: "Preparedness" },
    FunnelStage { key: "referral_source", label: "Referral Source" },
    FunnelStage { key: "rating_request", label: "Rating Request" },
    FunnelStage { key: "loading", label: "Loading" },
    FunnelStage { key: "plan_reveal", label: "Plan Reveal" },
];

/// What 100% means when converting stage counts to percentages.
///
/// Deserializes through [`FromStr`], so query strings and configuration
/// accept the same spellings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FunnelBaseline {
    /// Largest stage count (at least 1). Percentages never need capping.
    #[default]
    MaxCount,
    /// Count of the first stage. Later stages may exceed it and are capped.
    FirstStage,
}

impl<'de> Deserialize<'de> for FunnelBaseline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for FunnelBaseline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "max_count" => Ok(Self::MaxCount),
            "first" | "first_stage" => Ok(Self::FirstStage),
            other => Err(format!("unknown funnel baseline: {other}")),
        }
    }
}

/// One stage of a computed funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStep {
    /// Stage key.
    pub key: &'static str,
    /// Stage label.
    pub label: &'static str,
    /// Distinct users who reached the stage.
    pub count: usize,
    /// `count / baseline × 100`, capped to `[0, 100]`.
    pub percentage: f64,
    /// Previous stage count minus this count; 0 for the first stage.
    pub dropoff: i64,
}

/// A computed funnel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Funnel {
    /// Strategy the percentages were computed with.
    pub baseline_strategy: FunnelBaseline,
    /// Count that maps to 100%.
    pub baseline: usize,
    /// `false` when no stage was seen at all.
    pub has_data: bool,
    /// Stages in funnel order.
    pub steps: Vec<FunnelStep>,
}

/// Per screen: distinct users and raw event count.
fn tally_screens(events: &[Event]) -> HashMap<&str, (HashSet<&str>, usize)> {
    let mut tally: HashMap<&str, (HashSet<&str>, usize)> = HashMap::new();
    for event in events
        .iter()
        .filter(|e| e.is(event_names::ONBOARDING_SCREEN_VIEWED))
    {
        let Some(screen) = event.screen() else {
            continue;
        };
        let (users, seen) = tally.entry(screen).or_default();
        if let Some(user) = event.user() {
            users.insert(user);
        }
        *seen += 1;
    }
    tally
}

/// Counts distinct users per screen from `onboarding_screen_viewed` events.
///
/// A screen whose events carry no user ID at all falls back to its raw
/// event count, so installs that predate user IDs still show up.
#[must_use]
pub fn screen_counts(events: &[Event]) -> HashMap<String, usize> {
    tally_screens(events)
        .into_iter()
        .map(|(screen, (users, seen))| {
            let count = if users.is_empty() { seen } else { users.len() };
            (screen.to_string(), count)
        })
        .collect()
}

/// Distinct users per screen, with no fallback: a screen seen only by
/// anonymous events counts 0.
#[must_use]
pub fn screen_users(events: &[Event]) -> HashMap<String, usize> {
    tally_screens(events)
        .into_iter()
        .map(|(screen, (users, _))| (screen.to_string(), users.len()))
        .collect()
}

/// Builds the funnel for `stages` from per-stage counts.
#[must_use]
pub fn build_funnel(
    counts: &HashMap<String, usize>,
    stages: &[FunnelStage],
    strategy: FunnelBaseline,
) -> Funnel {
    let stage_count = |stage: &FunnelStage| counts.get(stage.key).copied().unwrap_or(0);

    let baseline = match strategy {
        FunnelBaseline::MaxCount => stages.iter().map(stage_count).max().unwrap_or(0).max(1),
        FunnelBaseline::FirstStage => stages.first().map_or(0, stage_count),
    };

    let mut steps = Vec::with_capacity(stages.len());
    let mut previous: Option<usize> = None;
    for stage in stages {
        let count = stage_count(stage);
        let percentage = if baseline > 0 {
            (count as f64 / baseline as f64 * 100.0).min(100.0)
        } else {
            0.0
        };
        let dropoff = previous.map_or(0, |prev| prev as i64 - count as i64);
        steps.push(FunnelStep {
            key: stage.key,
            label: stage.label,
            count,
            percentage,
            dropoff,
        });
        previous = Some(count);
    }

    Funnel {
        baseline_strategy: strategy,
        baseline,
        has_data: !counts.is_empty(),
        steps,
    }
}
