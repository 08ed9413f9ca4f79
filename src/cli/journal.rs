//! Journal commands: log, status, history.

use jiff::tz::TimeZone;

use crate::app::AppState;
use crate::model::Phase;
use crate::{phase, stats};
use crate::storage::Storage;

use super::format::{format_dashboard, format_event, format_phase_card};

/// Recent events shown under the status card.
const STATUS_RECENT: usize = 5;

pub(super) fn cmd_log(
    app: &mut AppState,
    storage: &Storage,
    trigger: Option<&str>,
    context: Option<&str>,
    now: i64,
    tz: &TimeZone,
) -> Result<(), String> {
    // An unfamiliar trigger joins the vocabulary, as if picked from it.
    let new_trigger = trigger
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| !app.settings().trigger_vocabulary().iter().any(|v| v == t));
    if let Some(name) = new_trigger {
        app.update_settings(storage, |s| {
            s.add_custom_trigger(name);
        })
        .map_err(|e| format!("failed to save settings: {e}"))?;
        eprintln!("Added trigger '{name}'");
    }

    let event = app.log_event(trigger, context, now);
    app.persist(storage, now)
        .map_err(|e| format!("failed to save log: {e}"))?;

    println!("Logged {}", format_event(&event, tz));
    if event.is_double {
        println!("Double! Less than 30 minutes since the last one. These are the first to cut.");
    }

    let state = app.phase_state(now);
    if state.phase == Phase::TriggerId && !event.has_trigger() {
        println!("Tip: add --trigger to record what made you reach for it.");
    }
    println!();
    println!("{}", format_phase_card(&state, app.settings().language));
    Ok(())
}

pub(super) fn cmd_status(app: &AppState, now: i64, tz: &TimeZone) -> Result<(), String> {
    let state = app.phase_state(now);
    let events = app.journal().events();
    let dashboard = stats::dashboard(events, app.settings(), &state, now, tz)
        .map_err(|e| format!("failed to compute stats: {e}"))?;

    println!("{}", format_phase_card(&state, app.settings().language));
    if let (Some(days), Some(hours)) = (
        phase::days_since_start(events, now),
        phase::hours_since_last(events, now),
    ) {
        println!("Tracking for {days:.1} days, last cigarette {hours:.1} hours ago");
    }
    println!();
    println!("{}", format_dashboard(&dashboard, app.settings()));

    println!();
    if events.is_empty() {
        println!("No records yet. Log your first with `freedompath log`.");
    } else {
        println!("Recent:");
        for event in app.journal().recent(STATUS_RECENT) {
            println!("  {}", format_event(event, tz));
        }
    }
    Ok(())
}

pub(super) fn cmd_history(app: &AppState, limit: Option<usize>, tz: &TimeZone) -> Result<(), String> {
    let journal = app.journal();
    if journal.is_empty() {
        println!("No records");
        return Ok(());
    }

    let events = match limit {
        Some(n) => journal.recent(n),
        None => journal.events(),
    };
    for event in events {
        println!("{}", format_event(event, tz));
    }
    Ok(())
}
