//! Local persistence: a small key-value store in one `SQLite` file.
//!
//! ```text
//! <root>/freedompath.sqlite
//!   kv(key, value)
//!     freedom_logs         # JSON array of logged events
//!     freedom_settings     # JSON settings record
//!     freedom_onboarding   # present once onboarding is complete
//! ```
//!
//! Values are JSON text. Writes replace a whole value; multi-key changes
//! run in one transaction.

mod journal;
mod settings;

use std::{fs, io, path::PathBuf};

use rusqlite::{Connection, OptionalExtension, Transaction};

const DB_FILE: &str = "freedompath.sqlite";

const LOGS_KEY: &str = "freedom_logs";
const SETTINGS_KEY: &str = "freedom_settings";
const ONBOARDING_KEY: &str = "freedom_onboarding";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local `SQLite`-backed key-value storage.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens the store under the given directory, creating both if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let conn = Connection::open(root.join(DB_FILE))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        log::debug!("opened store at {}", root.display());
        Ok(Self { conn })
    }

    /// Returns the default storage root: `~/.freedompath/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".freedompath"))
    }

    /// Clears the event log and the onboarding flag in one transaction.
    ///
    /// Settings survive a reset.
    pub fn reset(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        delete(&tx, LOGS_KEY)?;
        delete(&tx, ONBOARDING_KEY)?;
        tx.commit()?;
        log::debug!("store reset");
        Ok(())
    }

    /// Stores a raw value, bypassing serialization.
    #[cfg(test)]
    pub(crate) fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        put(&tx, key, value)?;
        tx.commit()?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?)
    }
}

fn put(tx: &Transaction<'_>, key: &str, value: &str) -> Result<()> {
    tx.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value],
    )?;
    Ok(())
}

fn delete(tx: &Transaction<'_>, key: &str) -> Result<()> {
    tx.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
}
