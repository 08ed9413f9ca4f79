//! External advisory services: pattern analysis and the conversational coach.
//!
//! Both are text-generation calls behind the [`Advisor`] trait. Nothing here
//! feeds back into the phase engine or the journal: a failed call is shown
//! to the user and forgotten.

mod gemini;
mod prompt;

pub use gemini::GeminiAdvisor;

use crate::journal::Journal;
use crate::model::{ChatMessage, CoachContext, LoggedEvent, Phase, Role, TriggerAnalysis};

/// Events needed before analysis unlocks.
pub const ANALYSIS_MIN_EVENTS: usize = 3;

/// Most recent events sent for analysis.
pub const ANALYSIS_WINDOW: usize = 30;

pub const COACH_GREETING: &str = "Hello! I'm your FreedomPath Coach. I'm here to support you \
    through your journey. How are you feeling about your progress today?";

pub const COACH_APOLOGY: &str =
    "Sorry, I'm having a bit of trouble connecting. Let's try again in a moment.";

/// Advisor errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdvisorError {
    #[error("no API key: set the {0} environment variable")]
    Disabled(String),

    #[error("not enough data yet: log at least 3 cigarettes")]
    InsufficientData,

    #[error("nothing to send: the conversation has no user message")]
    NoUserMessage,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    #[error("advisor returned an empty response")]
    EmptyResponse,
}

/// A text-generation backend for analysis and coaching.
pub trait Advisor {
    /// Rank triggers, count doubles, and suggest a next step for `events`.
    fn analyze(&self, events: &[LoggedEvent], phase: Phase)
    -> Result<TriggerAnalysis, AdvisorError>;

    /// Reply to the latest user message in `history`.
    fn coach(&self, history: &[ChatMessage], context: CoachContext) -> Result<String, AdvisorError>;
}

/// Analyze the trailing events of the journal.
///
/// Locked until [`ANALYSIS_MIN_EVENTS`] events exist.
pub fn analyze_patterns(
    advisor: &dyn Advisor,
    journal: &Journal,
    phase: Phase,
) -> Result<TriggerAnalysis, AdvisorError> {
    if journal.len() < ANALYSIS_MIN_EVENTS {
        return Err(AdvisorError::InsufficientData);
    }
    advisor.analyze(journal.recent(ANALYSIS_WINDOW), phase)
}

/// A coach conversation held in memory for one session.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Starts a conversation with the coach's greeting.
    pub fn new(now: i64) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Model,
                text: COACH_GREETING.to_string(),
                timestamp: now,
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends a user message and records the reply.
    ///
    /// Blank input is ignored and returns `None`. A failed call records
    /// [`COACH_APOLOGY`] so the conversation can carry on.
    pub fn send(
        &mut self,
        advisor: &dyn Advisor,
        text: &str,
        context: CoachContext,
        now: i64,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
            timestamp: now,
        });

        let reply = advisor.coach(&self.messages, context).unwrap_or_else(|e| {
            log::warn!("coach call failed: {e}");
            COACH_APOLOGY.to_string()
        });
        self.messages.push(ChatMessage {
            role: Role::Model,
            text: reply,
            timestamp: now,
        });
        self.messages.last()
    }
}
