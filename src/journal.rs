//! The event journal: an ordered, append-only log of smoking events.
//!
//! Append order is assumed to be chronological. Double detection compares
//! against the last appended event, so a backdated append would be judged
//! against the wrong neighbour. There is no single-event edit or delete;
//! the only other mutation is a full reset.

use uuid::Uuid;

use crate::model::LoggedEvent;

/// Events closer together than this are doubles.
pub const DOUBLE_WINDOW_MS: i64 = 30 * 60 * 1000;

/// In-memory event log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    events: Vec<LoggedEvent>,
}

impl Journal {
    /// Wraps events loaded from storage. Their `is_double` flags are kept
    /// as recorded.
    pub fn from_events(events: Vec<LoggedEvent>) -> Self {
        Self { events }
    }

    /// Appends a new event stamped at `now` and returns it.
    ///
    /// Blank trigger or context strings are recorded as absent.
    pub fn append(&mut self, trigger: Option<&str>, context: Option<&str>, now: i64) -> &LoggedEvent {
        let is_double = self
            .events
            .last()
            .is_some_and(|last| now - last.timestamp < DOUBLE_WINDOW_MS);

        self.events.push(LoggedEvent {
            id: Uuid::new_v4(),
            timestamp: now,
            trigger: non_blank(trigger),
            context: non_blank(context),
            is_double,
        });
        &self.events[self.events.len() - 1]
    }

    /// Drops every event.
    pub fn reset(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The trailing `n` events, oldest first.
    pub fn recent(&self, n: usize) -> &[LoggedEvent] {
        &self.events[self.events.len().saturating_sub(n)..]
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
