//! Advisory commands: insights, coach, and the craving exercise.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use jiff::Timestamp;

use crate::advisor::{self, Advisor, AdvisorError, Conversation};
use crate::app::AppState;
use crate::model::CoachContext;

use super::format::format_analysis;

/// One breathing cycle: four seconds in, four out.
const BREATH_CYCLE_SECS: u32 = 8;

pub(super) fn cmd_insights(
    app: &AppState,
    advisor: Result<&dyn Advisor, AdvisorError>,
    now: i64,
) -> Result<(), String> {
    let journal = app.journal();
    if journal.len() < advisor::ANALYSIS_MIN_EVENTS {
        println!(
            "Insights unlock after {} records ({} so far).",
            advisor::ANALYSIS_MIN_EVENTS,
            journal.len()
        );
        return Ok(());
    }

    let advisor = advisor.map_err(|e| format!("insights unavailable: {e}"))?;
    let phase = app.phase_state(now).phase;
    match advisor::analyze_patterns(advisor, journal, phase) {
        Ok(analysis) => println!("{}", format_analysis(&analysis)),
        Err(e) => {
            log::warn!("pattern analysis failed: {e}");
            println!("Couldn't analyze your patterns right now ({e}). Try again later.");
        }
    }
    Ok(())
}

/// Chat with the coach, one message per stdin line, until EOF.
pub(super) fn cmd_coach(
    app: &AppState,
    advisor: Result<&dyn Advisor, AdvisorError>,
    now: i64,
) -> Result<(), String> {
    let advisor = advisor.map_err(|e| format!("coach unavailable: {e}"))?;
    let context = CoachContext {
        event_count: app.journal().len(),
        phase: app.phase_state(now).phase,
    };

    let mut conversation = Conversation::new(now);
    println!("{}", advisor::COACH_GREETING);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| format!("failed to read input: {e}"))?;
        let sent_at = Timestamp::now().as_millisecond();
        if let Some(reply) = conversation.send(advisor, &line, context, sent_at) {
            println!("{}", reply.text);
        }
    }
    log::debug!("coach session ended after {} messages", conversation.messages().len());
    Ok(())
}

/// Guided breathing countdown.
pub(super) fn cmd_crave(seconds: u32) -> Result<(), String> {
    println!("Breathe deeply. Slow breath in, slow breath out...");
    let mut stdout = io::stdout();
    for remaining in (1..=seconds).rev() {
        print!("\r{:>3}s  {:<12}", remaining, breath_cue(remaining));
        stdout
            .flush()
            .map_err(|e| format!("failed to write output: {e}"))?;
        thread::sleep(Duration::from_secs(1));
    }
    println!("\rWell done! The craving will pass soon.");
    Ok(())
}

fn breath_cue(remaining: u32) -> &'static str {
    if remaining % BREATH_CYCLE_SECS < BREATH_CYCLE_SECS / 2 {
        "breathe in"
    } else {
        "breathe out"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breath_cue_alternates_every_four_seconds() {
        let cues: Vec<&str> = (0..8).rev().map(breath_cue).collect();
        assert_eq!(
            cues,
            [
                "breathe out",
                "breathe out",
                "breathe out",
                "breathe out",
                "breathe in",
                "breathe in",
                "breathe in",
                "breathe in",
            ]
        );
    }

    #[test]
    fn crave_with_zero_seconds_finishes_immediately() {
        assert!(cmd_crave(0).is_ok());
    }
}
