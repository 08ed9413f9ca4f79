//! Core data model for FreedomPath.
//!
//! Plain records shared by the journal, the phase engine, storage, and the
//! advisor: logged events, user settings, phases, and advisor payloads.

mod advice;
mod event;
mod phase;
mod settings;

pub use advice::{ChatMessage, CoachContext, Role, TriggerAnalysis, TriggerCount};
pub use event::LoggedEvent;
pub use phase::{Phase, PhaseState};
pub use settings::{CURRENCIES, Currency, Language, Settings};
