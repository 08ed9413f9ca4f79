//! Advisor payloads: pattern analysis results and coach conversations.

use serde::{Deserialize, Deserializer, Serialize, de};

use super::Phase;

/// Result of a pattern analysis over recent events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAnalysis {
    /// Most frequent triggers, highest count first.
    pub top_triggers: Vec<TriggerCount>,
    #[serde(deserialize_with = "count_from_number")]
    pub doubles_count: u32,
    pub advice: String,
    pub suggested_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCount {
    pub name: String,
    #[serde(deserialize_with = "count_from_number")]
    pub count: u32,
}

/// Counts arrive as JSON numbers, which models sometimes emit as `3.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value.round() as u32)
    } else {
        Err(de::Error::custom(format!("invalid count: {value}")))
    }
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// What the coach knows about the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoachContext {
    pub event_count: usize,
    pub phase: Phase,
}
