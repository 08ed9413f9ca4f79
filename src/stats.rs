//! Dashboard statistics: today's count, the weekly trend, and savings.
//!
//! Calendar days are local to the given time zone. Savings compare the
//! events actually logged against what the baseline rate would have
//! produced over the active days.

use jiff::{
    Timestamp, ToSpan,
    civil::Date,
    tz::TimeZone,
};

use crate::model::{LoggedEvent, PhaseState, Settings};
use crate::phase::MS_PER_DAY;

/// Number of days in the trend.
const TREND_DAYS: i32 = 7;

/// Events logged on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub date: Date,
    pub count: usize,
}

/// Everything the status screen shows besides the phase card.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub today_count: usize,
    pub today_doubles: usize,
    /// Oldest first, ending today.
    pub weekly_trend: Vec<DayCount>,
    pub days_active: u32,
    pub effective_baseline: f64,
    pub saved_cigarettes: f64,
    pub money_saved: f64,
}

/// The measured baseline when there is one, otherwise the user's own figure.
pub fn effective_baseline(state: &PhaseState, settings: &Settings) -> f64 {
    if state.calculated_baseline > 0.0 {
        state.calculated_baseline
    } else {
        settings.baseline_per_day
    }
}

/// Whole days since the first event, rounded up, never below one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn days_active(events: &[LoggedEvent], now: i64) -> u32 {
    let Some(start) = events.iter().map(|e| e.timestamp).min() else {
        return 1;
    };
    let days = ((now - start) as f64 / MS_PER_DAY as f64).ceil();
    if days < 1.0 { 1 } else { days as u32 }
}

/// Builds the dashboard for `now` in the given time zone.
pub fn dashboard(
    events: &[LoggedEvent],
    settings: &Settings,
    state: &PhaseState,
    now: i64,
    tz: &TimeZone,
) -> Result<Dashboard, jiff::Error> {
    let today = Timestamp::from_millisecond(now)?.to_zoned(tz.clone()).date();
    let today_start = day_start(today, tz)?;

    let today_events = events.iter().filter(|e| e.timestamp >= today_start);
    let (today_count, today_doubles) =
        today_events.fold((0, 0), |(count, doubles), e| (count + 1, doubles + usize::from(e.is_double)));

    let weekly_trend = weekly_trend(events, today, tz)?;

    let days_active = days_active(events, now);
    let effective_baseline = effective_baseline(state, settings);
    let expected = f64::from(days_active) * effective_baseline;
    let saved_cigarettes = (expected - events.len() as f64).max(0.0);
    let money_saved = saved_cigarettes * settings.cost_per_cigarette();

    Ok(Dashboard {
        today_count,
        today_doubles,
        weekly_trend,
        days_active,
        effective_baseline,
        saved_cigarettes,
        money_saved,
    })
}

/// Counts per calendar day for the seven days ending on `today`.
pub fn weekly_trend(
    events: &[LoggedEvent],
    today: Date,
    tz: &TimeZone,
) -> Result<Vec<DayCount>, jiff::Error> {
    let mut trend = Vec::with_capacity(TREND_DAYS as usize);
    for offset in (0..TREND_DAYS).rev() {
        let date = today.checked_sub(offset.days())?;
        let start = day_start(date, tz)?;
        let end = day_start(date.tomorrow()?, tz)?;
        let count = events
            .iter()
            .filter(|e| (start..end).contains(&e.timestamp))
            .count();
        trend.push(DayCount { date, count });
    }
    Ok(trend)
}

fn day_start(date: Date, tz: &TimeZone) -> Result<i64, jiff::Error> {
    Ok(date.to_zoned(tz.clone())?.timestamp().as_millisecond())
}
