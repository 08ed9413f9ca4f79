//! Logged events: one record per cigarette.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged cigarette.
///
/// Created only by the journal's append and never edited afterwards.
/// `is_double` is decided once, against the event appended before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedEvent {
    pub id: Uuid,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// What caused the craving. `None` means not yet identified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    /// Free-text note. Carries no weight for the phase engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Logged less than 30 minutes after the previous event.
    #[serde(default)]
    pub is_double: bool,
}

impl LoggedEvent {
    /// Whether this event carries a non-blank trigger tag.
    pub fn has_trigger(&self) -> bool {
        self.trigger.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}
