//! Prompt text for the weekly summary and the analytics chat.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::analytics::{ONBOARDING_SCREENS, WeeklyMetrics, event_breakdown};
use crate::domain::{Event, Submission, SubmissionStatus};

/// User message asking for a weekly summary of `this_week` against
/// `last_week`.
#[must_use]
pub fn weekly_summary_prompt(
    app_name: &str,
    this_week: &WeeklyMetrics,
    last_week: &WeeklyMetrics,
) -> String {
    format!(
        "Generate a concise weekly analytics summary for {app_name} app.

THIS WEEK'S DATA:
- Active users: {}
- Total events: {}
- Tips viewed: {}
- Onboarding starts: {}
- Onboarding completions: {}
- Completion rate: {}%

LAST WEEK (for comparison):
- Active users: {}
- Total events: {}
- Tips viewed: {}

Generate a summary with these sections:
1. **HIGHLIGHTS** (2-3 bullet points with key wins or concerns)
2. **ENGAGEMENT** (active users, tips viewed trend)
3. **ONBOARDING** (completion rate, any concerns)
4. **RECOMMENDATIONS** (1-2 actionable suggestions)

Use arrows (↑ ↓) for comparisons. Be concise - under 200 words total.
If there's no data, acknowledge it and suggest what to look for once data comes in.
",
        this_week.active_users,
        this_week.total_events,
        this_week.tips_viewed,
        this_week.onboarding_starts,
        this_week.onboarding_completions,
        this_week.completion_rate,
        last_week.active_users,
        last_week.total_events,
        last_week.tips_viewed,
    )
}

/// System prompt grounding the chat in recent data.
///
/// `recent` is the last week of events, `screens` the per-screen user
/// counts of the 30-day onboarding funnel, `submissions` the newest rows.
#[must_use]
pub fn chat_context(
    app_name: &str,
    recent: &[Event],
    screens: &HashMap<String, usize>,
    submissions: &[Submission],
) -> String {
    let mut breakdown = String::new();
    for (name, count) in event_breakdown(recent) {
        let _ = writeln!(breakdown, "- {name}: {count}");
    }

    let funnel = funnel_lines(screens);
    let funnel = if funnel.is_empty() {
        "No funnel data available yet".to_string()
    } else {
        funnel.join("\n")
    };

    let with_status =
        |status: SubmissionStatus| submissions.iter().filter(|s| s.status == status).count();

    format!(
        "You are an analytics assistant for {app_name}, a wedding countdown iOS app.
Answer questions about the app's analytics data concisely and accurately.

RECENT EVENTS (Last 7 days):
Total events: {total}
Event breakdown:
{breakdown}
ONBOARDING FUNNEL (Last 30 days):
{funnel}

WEDDING SUBMISSIONS:
Total: {submitted}
Pending: {pending}
Approved: {approved}

Guidelines:
- Be concise and data-driven
- If you notice anomalies or patterns, mention them
- Format numbers with commas (e.g., \"1,234\")
- If data is missing, acknowledge it honestly
- Provide actionable insights when possible
",
        total = recent.len(),
        submitted = submissions.len(),
        pending = with_status(SubmissionStatus::Pending),
        approved = with_status(SubmissionStatus::Approved),
    )
}

/// `"{screen}: {n} users"` lines, known screens in onboarding order first.
fn funnel_lines(screens: &HashMap<String, usize>) -> Vec<String> {
    let mut unknown: Vec<(&String, &usize)> = screens
        .iter()
        .filter(|(key, _)| !ONBOARDING_SCREENS.iter().any(|s| s.key == key.as_str()))
        .collect();
    unknown.sort();

    ONBOARDING_SCREENS
        .iter()
        .filter_map(|stage| screens.get(stage.key).map(|n| (stage.key, *n)))
        .chain(unknown.into_iter().map(|(key, n)| (key.as_str(), *n)))
        .map(|(screen, users)| format!("{screen}: {users} users"))
        .collect()
}
