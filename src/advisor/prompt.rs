//! Prompt construction for the advisor.

use jiff::{Timestamp, tz::TimeZone};
use serde::Serialize;
use serde_json::{Value, json};

use crate::model::{CoachContext, Language, LoggedEvent, Phase};

/// What the model sees of one event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventSummary<'a> {
    /// Local time of day.
    time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
    is_double: bool,
}

fn language_name(language: Language) -> &'static str {
    match language {
        Language::En => "English",
        Language::Ru => "Russian",
        Language::Es => "Spanish",
    }
}

fn time_of_day(timestamp: i64, tz: &TimeZone) -> String {
    Timestamp::from_millisecond(timestamp)
        .map(|t| t.to_zoned(tz.clone()).strftime("%H:%M:%S").to_string())
        .unwrap_or_default()
}

pub(super) fn analysis_prompt(
    events: &[LoggedEvent],
    phase: Phase,
    language: Language,
    tz: &TimeZone,
) -> String {
    let summaries: Vec<EventSummary<'_>> = events
        .iter()
        .map(|e| EventSummary {
            time: time_of_day(e.timestamp, tz),
            trigger: e.trigger.as_deref(),
            context: e.context.as_deref(),
            is_double: e.is_double,
        })
        .collect();
    let records = serde_json::to_string(&summaries).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Analyze these smoking records for a user in the \"{phase}\" phase.\n\
         Find the most frequent triggers and count the \"double\" cigarettes \
         (smoked within 30 minutes of the previous one).\n\
         Records: {records}.\n\
         Answer strictly in {language}.",
        phase = phase.tag(),
        language = language_name(language),
    )
}

/// Response schema in the service's OpenAPI subset.
pub(super) fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topTriggers": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "count": { "type": "NUMBER" }
                    },
                    "required": ["name", "count"]
                }
            },
            "doublesCount": { "type": "NUMBER" },
            "advice": { "type": "STRING" },
            "suggestedAction": { "type": "STRING" }
        },
        "required": ["topTriggers", "doublesCount", "advice", "suggestedAction"]
    })
}

pub(super) fn coach_instruction(context: CoachContext, language: Language) -> String {
    format!(
        "You are the FreedomPath Coach, an empathetic expert in quitting smoking.\n\
         The user is currently in the {phase} phase.\n\
         Total records: {count}.\n\
         Focus on gradual harm reduction and on uncovering psychological triggers.\n\
         Your goal is to help the user get down to 4 cigarettes a day, then quit entirely.\n\
         Answer strictly in {language}. Be supportive, never judgmental.",
        phase = context.phase.tag(),
        count = context.event_count,
        language = language_name(language),
    )
}
