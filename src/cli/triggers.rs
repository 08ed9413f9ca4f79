//! Trigger vocabulary commands: list, add, remove.

use clap::Subcommand;

use crate::app::AppState;
use crate::storage::Storage;

#[derive(Debug, Subcommand)]
pub enum TriggersCommand {
    /// List built-in and custom triggers.
    List,

    /// Add a custom trigger. Duplicates are ignored.
    Add { name: String },

    /// Remove a custom trigger.
    ///
    /// Exits non-zero if the trigger is not a custom one.
    Remove { name: String },
}

pub(super) fn cmd_list(app: &AppState) -> Result<(), String> {
    let settings = app.settings();
    for trigger in settings.language.default_triggers() {
        println!("{trigger}");
    }
    for trigger in &settings.custom_triggers {
        println!("{trigger}  [custom]");
    }
    Ok(())
}

pub(super) fn cmd_add(app: &mut AppState, storage: &Storage, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("trigger name cannot be blank".to_string());
    }
    let mut added = false;
    app.update_settings(storage, |s| added = s.add_custom_trigger(name))
        .map_err(|e| format!("failed to save settings: {e}"))?;

    if added {
        eprintln!("Added trigger '{}'", name.trim());
    } else {
        eprintln!("Trigger '{}' already exists", name.trim());
    }
    Ok(())
}

pub(super) fn cmd_remove(app: &mut AppState, storage: &Storage, name: &str) -> Result<(), String> {
    if !app.settings().custom_triggers.iter().any(|t| t == name.trim()) {
        return Err(format!("'{}' is not a custom trigger", name.trim()));
    }
    app.update_settings(storage, |s| {
        s.remove_custom_trigger(name);
    })
    .map_err(|e| format!("failed to save settings: {e}"))?;

    eprintln!("Removed trigger '{}'", name.trim());
    Ok(())
}
