//! Application state: the journal, settings, and onboarding flag.
//!
//! Loaded once per process and passed explicitly to whatever needs it.
//! Mutations happen in memory first; persisting is a separate call so a
//! failed write never rolls back what the user just logged.

use crate::journal::Journal;
use crate::model::{LoggedEvent, PhaseState, Settings};
use crate::phase;
use crate::storage::{Result, Storage, StorageError};

pub struct AppState {
    journal: Journal,
    settings: Settings,
    onboarded: bool,
}

impl AppState {
    /// Loads state from storage.
    ///
    /// A stored log or settings record that fails to parse is replaced by
    /// its default, so a damaged value never locks the user out.
    pub fn load(storage: &Storage) -> Result<Self> {
        let events = or_default(storage.load_events(), "event log")?;
        let settings = or_default(storage.load_settings(), "settings")?.unwrap_or_default();
        let onboarded = storage.onboarding_complete()?;

        log::debug!("loaded {} events, onboarded: {onboarded}", events.len());
        Ok(Self {
            journal: Journal::from_events(events),
            settings,
            onboarded,
        })
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_onboarded(&self) -> bool {
        self.onboarded
    }

    /// Runs the phase engine over the current log.
    pub fn phase_state(&self, now: i64) -> PhaseState {
        phase::compute(self.journal.events(), self.settings.baseline_per_day, now)
    }

    /// Appends an event in memory. Call [`AppState::persist`] afterwards.
    pub fn log_event(
        &mut self,
        trigger: Option<&str>,
        context: Option<&str>,
        now: i64,
    ) -> LoggedEvent {
        self.journal.append(trigger, context, now).clone()
    }

    /// Writes the log and settings.
    ///
    /// The stored settings carry the measured baseline once there is one,
    /// so the user's figure is only kept until the engine can do better.
    pub fn persist(&mut self, storage: &Storage, now: i64) -> Result<()> {
        let state = self.phase_state(now);
        if state.calculated_baseline > 0.0 {
            self.settings.baseline_per_day = state.calculated_baseline;
        }
        storage.save_events(self.journal.events())?;
        storage.save_settings(&self.settings)?;
        Ok(())
    }

    /// Applies a change to the settings and stores them.
    pub fn update_settings(
        &mut self,
        storage: &Storage,
        change: impl FnOnce(&mut Settings),
    ) -> Result<()> {
        change(&mut self.settings);
        storage.save_settings(&self.settings)
    }

    pub fn complete_onboarding(&mut self, storage: &Storage) -> Result<()> {
        storage.save_settings(&self.settings)?;
        storage.set_onboarding_complete()?;
        self.onboarded = true;
        Ok(())
    }

    /// Clears the log and the onboarding flag.
    ///
    /// Storage is cleared first, in one transaction; memory follows only
    /// if that succeeds, so the two never disagree.
    pub fn reset(&mut self, storage: &Storage) -> Result<()> {
        storage.reset()?;
        self.journal.reset();
        self.onboarded = false;
        Ok(())
    }
}

fn or_default<T: Default>(loaded: Result<T>, what: &str) -> Result<T> {
    match loaded {
        Err(StorageError::Json(e)) => {
            log::warn!("stored {what} is corrupt, starting fresh: {e}");
            Ok(T::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::Phase;
    use crate::phase::MS_PER_HOUR;

    const NOW: i64 = 1_750_000_000_000;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("store")).unwrap();
        (dir, storage)
    }

    #[test]
    fn fresh_store_loads_defaults() {
        let (_dir, storage) = test_storage();
        let state = AppState::load(&storage).unwrap();

        assert!(state.journal().is_empty());
        assert_eq!(state.settings(), &Settings::default());
        assert!(!state.is_onboarded());
        assert_eq!(state.phase_state(NOW).phase, Phase::Baseline);
    }

    #[test]
    fn logged_events_survive_reload() {
        let (_dir, storage) = test_storage();
        let mut state = AppState::load(&storage).unwrap();

        let event = state.log_event(Some("Coffee"), Some("after lunch"), NOW);
        state.persist(&storage, NOW).unwrap();

        let reloaded = AppState::load(&storage).unwrap();
        assert_eq!(reloaded.journal().events(), &[event]);
    }

    #[test]
    fn persist_writes_back_measured_baseline() {
        let (_dir, storage) = test_storage();
        let mut state = AppState::load(&storage).unwrap();
        state
            .update_settings(&storage, |s| s.baseline_per_day = 20.0)
            .unwrap();

        for h in [100, 90, 80] {
            state.log_event(None, None, NOW - h * MS_PER_HOUR);
        }
        state.persist(&storage, NOW).unwrap();

        let stored = storage.load_settings().unwrap().unwrap();
        assert!((stored.baseline_per_day - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn persist_keeps_user_baseline_until_measured() {
        let (_dir, storage) = test_storage();
        let mut state = AppState::load(&storage).unwrap();
        state
            .update_settings(&storage, |s| s.baseline_per_day = 20.0)
            .unwrap();

        state.log_event(None, None, NOW);
        state.persist(&storage, NOW).unwrap();

        let stored = storage.load_settings().unwrap().unwrap();
        assert!((stored.baseline_per_day - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_clears_log_and_onboarding() {
        let (_dir, storage) = test_storage();
        let mut state = AppState::load(&storage).unwrap();
        state.complete_onboarding(&storage).unwrap();
        state.log_event(None, None, NOW);
        state.persist(&storage, NOW).unwrap();

        state.reset(&storage).unwrap();

        assert!(state.journal().is_empty());
        assert!(!state.is_onboarded());
        let reloaded = AppState::load(&storage).unwrap();
        assert!(reloaded.journal().is_empty());
        assert!(!reloaded.is_onboarded());
    }

    #[test]
    fn corrupt_log_falls_back_to_empty() {
        let (_dir, storage) = test_storage();
        let mut state = AppState::load(&storage).unwrap();
        state
            .update_settings(&storage, |s| s.currency = "USD".into())
            .unwrap();
        state.log_event(None, None, NOW);
        state.persist(&storage, NOW).unwrap();
        corrupt(&storage, "freedom_logs");

        let reloaded = AppState::load(&storage).unwrap();
        assert!(reloaded.journal().is_empty());
        assert_eq!(reloaded.settings().currency, "USD");
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let (_dir, storage) = test_storage();
        corrupt(&storage, "freedom_settings");

        let state = AppState::load(&storage).unwrap();
        assert_eq!(state.settings(), &Settings::default());
    }

    fn corrupt(storage: &Storage, key: &str) {
        storage.write_raw(key, "[[[").unwrap();
    }
}
