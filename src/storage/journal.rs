//! Event log storage: the whole log is one JSON array.

use crate::model::LoggedEvent;

use super::{LOGS_KEY, Result, Storage, put};

impl Storage {
    /// Replaces the stored event log.
    pub fn save_events(&self, events: &[LoggedEvent]) -> Result<()> {
        let json = serde_json::to_string(events)?;
        let tx = self.conn.unchecked_transaction()?;
        put(&tx, LOGS_KEY, &json)?;
        tx.commit()?;
        Ok(())
    }

    /// Loads the event log in stored order.
    ///
    /// Returns an empty vec if nothing was stored yet. A value that does
    /// not parse is an error.
    pub fn load_events(&self) -> Result<Vec<LoggedEvent>> {
        match self.get(LOGS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }
}
