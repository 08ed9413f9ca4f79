//! Settings and onboarding flag storage.

use crate::model::Settings;

use super::{ONBOARDING_KEY, Result, SETTINGS_KEY, Storage, put};

impl Storage {
    /// Replaces the stored settings record.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        let tx = self.conn.unchecked_transaction()?;
        put(&tx, SETTINGS_KEY, &json)?;
        tx.commit()?;
        Ok(())
    }

    /// Loads the settings record, if one was stored.
    ///
    /// Fields missing from the stored record take their defaults.
    pub fn load_settings(&self) -> Result<Option<Settings>> {
        match self.get(SETTINGS_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Whether onboarding has been completed. Absent means it has not.
    pub fn onboarding_complete(&self) -> Result<bool> {
        Ok(self.get(ONBOARDING_KEY)?.is_some())
    }

    pub fn set_onboarding_complete(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        put(&tx, ONBOARDING_KEY, "true")?;
        tx.commit()?;
        Ok(())
    }
}
