//! Output formatting for CLI display.

use std::fmt::Write as _;

use jiff::{Timestamp, tz::TimeZone};

use crate::model::{
    Language, LoggedEvent, Phase, PhaseState, Settings, TriggerAnalysis, TriggerCount,
};
use crate::stats::Dashboard;

const BAR_WIDTH: usize = 20;

/// A fixed-width bar for a percentage in `[0, 100]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub(super) fn format_phase_card(state: &PhaseState, language: Language) -> String {
    let info = state.phase.info();
    let mut out = format!(
        "Phase {}/{}: {} ({})\n{}\n{} {:.0}%",
        info.ordinal,
        Phase::ALL.len(),
        info.title.get(language),
        state.phase.tag(),
        info.description.get(language),
        progress_bar(state.progress),
        state.progress,
    );
    if state.calculated_baseline > 0.0 {
        let _ = write!(out, "\nBaseline: {:.1} a day", state.calculated_baseline);
    }
    match state.phase.next() {
        Some(next) => {
            let _ = write!(
                out,
                "\nNext: {} → {}",
                info.condition,
                next.info().title.get(language)
            );
        }
        None => {
            let _ = write!(out, "\n{}", info.condition);
        }
    }
    out
}

/// Local date and time of an event, or the raw value if out of range.
pub(super) fn format_time(timestamp: i64, tz: &TimeZone) -> String {
    Timestamp::from_millisecond(timestamp).map_or_else(
        |_| timestamp.to_string(),
        |t| t.to_zoned(tz.clone()).strftime("%Y-%m-%d %H:%M").to_string(),
    )
}

pub(super) fn format_event(event: &LoggedEvent, tz: &TimeZone) -> String {
    let mut line = format!(
        "{}  {}",
        format_time(event.timestamp, tz),
        event.trigger.as_deref().unwrap_or("-")
    );
    if let Some(context) = &event.context {
        let _ = write!(line, "  ({context})");
    }
    if event.is_double {
        line.push_str("  [double]");
    }
    line
}

pub(super) fn format_dashboard(dashboard: &Dashboard, settings: &Settings) -> String {
    let mut out = format!(
        "Today: {} ({} double)\nDays active: {}",
        dashboard.today_count,
        dashboard.today_doubles,
        dashboard.days_active
    );
    if dashboard.effective_baseline > 0.0 {
        let _ = write!(
            out,
            "\nSaved: {:.0} cigarettes, {:.2} {}",
            dashboard.saved_cigarettes,
            dashboard.money_saved,
            settings.currency_symbol()
        );
    }

    out.push_str("\n\nThis week:");
    let peak = dashboard
        .weekly_trend
        .iter()
        .map(|d| d.count)
        .max()
        .unwrap_or(0);
    for day in &dashboard.weekly_trend {
        let width = if peak == 0 {
            0
        } else {
            day.count * BAR_WIDTH / peak
        };
        let _ = write!(
            out,
            "\n  {}  {:>3}  {}",
            day.date.strftime("%a %m-%d"),
            day.count,
            "#".repeat(width)
        );
    }
    out
}

pub(super) fn format_analysis(analysis: &TriggerAnalysis) -> String {
    let mut out = String::from("Top triggers:");
    if analysis.top_triggers.is_empty() {
        out.push_str("\n  (none yet)");
    }
    for trigger in &analysis.top_triggers {
        let _ = write!(out, "\n  {}", format_trigger_count(trigger));
    }
    let _ = write!(
        out,
        "\nDoubles: {}\n\n{}\n\nTry this: {}",
        analysis.doubles_count, analysis.advice, analysis.suggested_action
    );
    out
}

fn format_trigger_count(trigger: &TriggerCount) -> String {
    format!("{:<20} {}", trigger.name, trigger.count)
}

/// The path through all five phases.
pub(super) fn format_guide(language: Language) -> String {
    Phase::ALL
        .iter()
        .map(|phase| {
            let info = phase.info();
            format!(
                "{}. {} ({}) [{}, {}]\n   {}\n   To move on: {}",
                info.ordinal,
                info.title.get(language),
                phase.tag(),
                info.icon,
                info.color,
                info.description.get(language),
                info.condition,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use uuid::Uuid;

    use crate::stats::DayCount;

    // 2026-03-10 15:00:00 UTC
    const NOW: i64 = 1_773_154_800_000;

    fn event(trigger: Option<&str>, context: Option<&str>, is_double: bool) -> LoggedEvent {
        LoggedEvent {
            id: Uuid::new_v4(),
            timestamp: NOW,
            trigger: trigger.map(String::from),
            context: context.map(String::from),
            is_double,
        }
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(progress_bar(250.0), progress_bar(100.0));
    }

    #[test]
    fn phase_card_shows_title_progress_and_next_step() {
        let state = PhaseState {
            phase: Phase::TriggerId,
            progress: 60.0,
            calculated_baseline: 12.0,
        };
        let card = format_phase_card(&state, Language::En);

        assert!(card.starts_with("Phase 2/5: Triggers (TRIGGER_ID)"));
        assert!(card.contains(" 60%"));
        assert!(card.contains("Baseline: 12.0 a day"));
        assert!(card.contains("→ Reduction"));
    }

    #[test]
    fn phase_card_for_freedom_has_no_next_phase() {
        let state = PhaseState {
            phase: Phase::Freedom,
            progress: 100.0,
            calculated_baseline: 0.0,
        };
        let card = format_phase_card(&state, Language::En);

        assert!(!card.contains("→"));
        assert!(!card.contains("Baseline:"));
        assert!(card.ends_with(Phase::Freedom.info().condition));
    }

    #[test]
    fn event_line_marks_doubles_and_context() {
        let line = format_event(&event(Some("Coffee"), Some("office"), true), &TimeZone::UTC);
        assert_eq!(line, "2026-03-10 15:00  Coffee  (office)  [double]");

        let line = format_event(&event(None, None, false), &TimeZone::UTC);
        assert_eq!(line, "2026-03-10 15:00  -");
    }

    #[test]
    fn dashboard_scales_trend_to_busiest_day() {
        let dashboard = Dashboard {
            today_count: 4,
            today_doubles: 1,
            weekly_trend: vec![
                DayCount {
                    date: date(2026, 3, 9),
                    count: 8,
                },
                DayCount {
                    date: date(2026, 3, 10),
                    count: 4,
                },
            ],
            days_active: 2,
            effective_baseline: 10.0,
            saved_cigarettes: 8.0,
            money_saved: 80.0,
        };
        let settings = Settings {
            currency: "USD".into(),
            ..Settings::default()
        };
        let text = format_dashboard(&dashboard, &settings);

        assert!(text.contains("Today: 4 (1 double)"));
        assert!(text.contains("Saved: 8 cigarettes, 80.00 $"));
        assert!(text.contains(&format!("Mon 03-09    8  {}", "#".repeat(20))));
        assert!(text.ends_with(&format!("Tue 03-10    4  {}", "#".repeat(10))));
    }

    #[test]
    fn dashboard_hides_savings_without_baseline() {
        let dashboard = Dashboard {
            today_count: 0,
            today_doubles: 0,
            weekly_trend: Vec::new(),
            days_active: 1,
            effective_baseline: 0.0,
            saved_cigarettes: 0.0,
            money_saved: 0.0,
        };
        assert!(!format_dashboard(&dashboard, &Settings::default()).contains("Saved"));
    }

    #[test]
    fn analysis_lists_triggers_and_action() {
        let analysis = TriggerAnalysis {
            top_triggers: vec![TriggerCount {
                name: "Coffee".into(),
                count: 4,
            }],
            doubles_count: 2,
            advice: "Coffee is your strongest cue.".into(),
            suggested_action: "Switch to tea.".into(),
        };
        let text = format_analysis(&analysis);

        assert!(text.contains(&format!("\n  Coffee{} 4\n", " ".repeat(14))));
        assert!(text.contains("Doubles: 2"));
        assert!(text.ends_with("Try this: Switch to tea."));
    }

    #[test]
    fn guide_covers_every_phase_in_order() {
        let guide = format_guide(Language::Es);
        let positions: Vec<usize> = Phase::ALL
            .iter()
            .map(|p| guide.find(p.tag()).unwrap())
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(guide.contains("Libertad"));
        assert!(guide.contains("4. Cuatro Finales (STABILIZE_4) [wind, teal]"));
    }
}
