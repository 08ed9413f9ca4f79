//! The phase engine: classify the user from the event log.
//!
//! [`compute`] is a pure function of the log, a fallback baseline, and the
//! current instant. It keeps no state and does no I/O, so the phase is
//! re-derived from scratch on every call and can move backward when
//! behavior regresses.
//!
//! Phases are tested top to bottom; the first match wins:
//!
//! 1. `BASELINE` until three days have passed since the first event.
//! 2. `TRIGGER_ID` until ten events carry a trigger.
//! 3. `REDUCTION` while the trailing three-day average is above four a day.
//! 4. `STABILIZE_4` until 24 hours pass without an event.
//! 5. `FREEDOM` otherwise.
//!
//! Elapsed days are real-valued everywhere (no rounding), both for the
//! `BASELINE` gate and for its progress.

use crate::model::{LoggedEvent, Phase, PhaseState};

pub const MS_PER_HOUR: i64 = 60 * 60 * 1000;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Length of the observation window, in days.
const OBSERVATION_DAYS: f64 = 3.0;

/// Triggered events needed to leave `TRIGGER_ID`.
const TRIGGER_TARGET: usize = 10;

/// The daily count the program reduces toward.
const DAILY_TARGET: f64 = 4.0;

/// Reference baseline when neither a measured nor a user baseline exists.
const DEFAULT_BASELINE: f64 = 15.0;

/// Hours without an event needed to reach `FREEDOM`.
const SMOKE_FREE_HOURS: f64 = 24.0;

/// Classify the log at `now` (milliseconds since the epoch).
///
/// `fallback_baseline` is the user's own estimate of daily cigarettes,
/// consulted only when the measured baseline is zero.
pub fn compute(events: &[LoggedEvent], fallback_baseline: f64, now: i64) -> PhaseState {
    let (Some(start), Some(latest)) = (earliest(events), latest(events)) else {
        return state(Phase::Baseline, 0.0, 0.0);
    };

    let days = elapsed(start, now, MS_PER_DAY);
    if days < OBSERVATION_DAYS {
        return state(Phase::Baseline, days / OBSERVATION_DAYS * 100.0, 0.0);
    }

    let baseline = calculated_baseline(events, now);

    let triggered = triggered_count(events);
    if triggered < TRIGGER_TARGET {
        let progress = triggered as f64 / TRIGGER_TARGET as f64 * 100.0;
        return state(Phase::TriggerId, progress, baseline);
    }

    let avg_recent = trailing_average(events, now);
    if avg_recent > DAILY_TARGET {
        let reference = reference_baseline(baseline, fallback_baseline);
        return state(
            Phase::Reduction,
            reduction_progress(reference, avg_recent),
            baseline,
        );
    }

    let hours = elapsed(latest, now, MS_PER_HOUR);
    if hours < SMOKE_FREE_HOURS {
        return state(
            Phase::Stabilize4,
            hours / SMOKE_FREE_HOURS * 100.0,
            baseline,
        );
    }

    state(Phase::Freedom, 100.0, baseline)
}

/// Days since the earliest event, or `None` for an empty log.
pub fn days_since_start(events: &[LoggedEvent], now: i64) -> Option<f64> {
    earliest(events).map(|start| elapsed(start, now, MS_PER_DAY))
}

/// Hours since the most recent event, or `None` for an empty log.
pub fn hours_since_last(events: &[LoggedEvent], now: i64) -> Option<f64> {
    latest(events).map(|last| elapsed(last, now, MS_PER_HOUR))
}

/// Average events per day during the first three days of logging.
///
/// Counts events stamped no later than three days after the earliest one.
/// Zero until the observation window has fully elapsed.
pub fn calculated_baseline(events: &[LoggedEvent], now: i64) -> f64 {
    let Some(start) = earliest(events) else {
        return 0.0;
    };
    if elapsed(start, now, MS_PER_DAY) < OBSERVATION_DAYS {
        return 0.0;
    }
    let window_end = start + 3 * MS_PER_DAY;
    let count = events.iter().filter(|e| e.timestamp <= window_end).count();
    count as f64 / OBSERVATION_DAYS
}

/// Events in the last three days divided by three.
///
/// The divisor is fixed, so a log younger than three days reads low.
pub fn trailing_average(events: &[LoggedEvent], now: i64) -> f64 {
    let since = now - 3 * MS_PER_DAY;
    let count = events.iter().filter(|e| e.timestamp >= since).count();
    count as f64 / OBSERVATION_DAYS
}

/// Number of events with a non-blank trigger.
pub fn triggered_count(events: &[LoggedEvent]) -> usize {
    events.iter().filter(|e| e.has_trigger()).count()
}

/// Measured baseline, else the user's fallback, else the default.
fn reference_baseline(measured: f64, fallback: f64) -> f64 {
    if measured > 0.0 {
        measured
    } else if fallback > 0.0 {
        fallback
    } else {
        DEFAULT_BASELINE
    }
}

/// How far the recent average has come down from `reference` toward the
/// daily target. Unclamped: a reference at or below the target can yield
/// a negative, infinite, or above-100 value, which [`state`] bounds.
fn reduction_progress(reference: f64, avg_recent: f64) -> f64 {
    (reference - avg_recent) / (reference - DAILY_TARGET) * 100.0
}

fn state(phase: Phase, progress: f64, calculated_baseline: f64) -> PhaseState {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    };
    PhaseState {
        phase,
        progress,
        calculated_baseline,
    }
}

fn elapsed(from: i64, now: i64, unit: i64) -> f64 {
    (now - from) as f64 / unit as f64
}

fn earliest(events: &[LoggedEvent]) -> Option<i64> {
    events.iter().map(|e| e.timestamp).min()
}

fn latest(events: &[LoggedEvent]) -> Option<i64> {
    events.iter().map(|e| e.timestamp).max()
}
