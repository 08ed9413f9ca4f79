//! CLI interface for FreedomPath.
//!
//! Each subcommand loads the application state, does one thing, and exits.
//! Nothing runs in the background: the phase is re-derived from the log on
//! every invocation.

mod advice;
mod format;
mod journal;
mod settings;
mod triggers;

use clap::{Parser, Subcommand};
use jiff::{Timestamp, tz::TimeZone};

use crate::advisor::{Advisor, GeminiAdvisor};
use crate::app::AppState;
use crate::config::Config;
use crate::storage::Storage;

use settings::{LanguageArg, Onboarding, SettingsCommand};
use triggers::TriggersCommand;

/// FreedomPath: cut down, then quit, one phase at a time.
#[derive(Debug, Parser)]
#[command(name = "freedompath", version, after_long_help = PATH_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const PATH_HELP: &str = r#"Getting started:
  1. freedompath onboard --language en --currency USD --cost-per-pack 8
  2. freedompath log --trigger Coffee --context "after breakfast"
  3. freedompath status

Later on:
  freedompath insights      # once you have 3 or more records
  freedompath coach         # talk it through, one message per line
  freedompath crave         # 60 seconds of guided breathing"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a cigarette and show the updated phase.
    Log {
        /// What triggered it. Unknown triggers are added to your list.
        #[arg(long)]
        trigger: Option<String>,

        /// Free-text note.
        #[arg(long)]
        context: Option<String>,
    },

    /// Show the current phase, today's numbers, and the weekly trend.
    Status,

    /// List logged cigarettes, oldest first.
    History {
        /// Show only the most recent N.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Explain the five phases.
    Guide,

    /// Analyze your patterns. Needs at least 3 records.
    Insights,

    /// Chat with the coach. Reads one message per line from stdin.
    Coach,

    /// Breathe through a craving.
    Crave {
        /// Length of the exercise.
        #[arg(long, default_value_t = 60)]
        seconds: u32,
    },

    /// Manage the trigger list.
    Triggers {
        #[command(subcommand)]
        command: TriggersCommand,
    },

    /// Show or change settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Set language and pack price, and finish onboarding.
    Onboard {
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,

        /// Currency code, e.g. USD.
        #[arg(long)]
        currency: Option<String>,

        #[arg(long)]
        cost_per_pack: Option<f64>,

        #[arg(long)]
        pack_size: Option<f64>,
    },

    /// Delete every record and restart onboarding. Settings are kept.
    Reset {
        /// Confirm the reset. Nothing is deleted without it.
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    /// Whether the command is useful before onboarding.
    fn works_without_onboarding(&self) -> bool {
        matches!(self, Self::Onboard { .. } | Self::Guide | Self::Reset { .. })
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    let mut app = AppState::load(storage).map_err(|e| format!("failed to load state: {e}"))?;
    if !app.is_onboarded() && !cli.command.works_without_onboarding() {
        eprintln!("Tip: run `freedompath onboard` to set your language and pack price.");
    }

    let now = Timestamp::now().as_millisecond();
    let tz = TimeZone::system();

    match cli.command {
        Command::Log { trigger, context } => journal::cmd_log(
            &mut app,
            storage,
            trigger.as_deref(),
            context.as_deref(),
            now,
            &tz,
        ),
        Command::Status => journal::cmd_status(&app, now, &tz),
        Command::History { limit } => journal::cmd_history(&app, limit, &tz),
        Command::Guide => {
            println!("{}", format::format_guide(app.settings().language));
            Ok(())
        }
        Command::Insights => {
            let gemini = GeminiAdvisor::new(&config.advisor, app.settings().language);
            let advisor = gemini.as_ref().map(|a| a as &dyn Advisor).map_err(Clone::clone);
            advice::cmd_insights(&app, advisor, now)
        }
        Command::Coach => {
            let gemini = GeminiAdvisor::new(&config.advisor, app.settings().language);
            let advisor = gemini.as_ref().map(|a| a as &dyn Advisor).map_err(Clone::clone);
            advice::cmd_coach(&app, advisor, now)
        }
        Command::Crave { seconds } => advice::cmd_crave(seconds),
        Command::Triggers { command } => match command {
            TriggersCommand::List => triggers::cmd_list(&app),
            TriggersCommand::Add { name } => triggers::cmd_add(&mut app, storage, &name),
            TriggersCommand::Remove { name } => triggers::cmd_remove(&mut app, storage, &name),
        },
        Command::Settings { command } => match command {
            SettingsCommand::Show => settings::cmd_show(app.settings()),
            SettingsCommand::Set { field, value } => {
                settings::cmd_set(&mut app, storage, field, &value)
            }
        },
        Command::Onboard {
            language,
            currency,
            cost_per_pack,
            pack_size,
        } => settings::cmd_onboard(
            &mut app,
            storage,
            &Onboarding {
                language,
                currency,
                cost_per_pack,
                pack_size,
            },
        ),
        Command::Reset { yes } => cmd_reset(&mut app, storage, yes),
    }
}

fn cmd_reset(app: &mut AppState, storage: &Storage, confirmed: bool) -> Result<(), String> {
    if !confirmed {
        return Err(format!(
            "this deletes all {} records; re-run with --yes to confirm",
            app.journal().len()
        ));
    }
    app.reset(storage)
        .map_err(|e| format!("failed to reset: {e}"))?;
    eprintln!("Progress reset. Run `freedompath onboard` to start again.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn crave_defaults_to_sixty_seconds() {
        let cli = Cli::try_parse_from(["freedompath", "crave"]).unwrap();
        assert!(matches!(cli.command, Command::Crave { seconds: 60 }));
    }

    #[test]
    fn settings_set_parses_kebab_case_field() {
        let cli =
            Cli::try_parse_from(["freedompath", "settings", "set", "cost-per-pack", "300"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Settings {
                command: SettingsCommand::Set { .. }
            }
        ));
    }

    #[test]
    fn onboarding_hint_skips_setup_commands() {
        let guide = Cli::try_parse_from(["freedompath", "guide"]).unwrap();
        let status = Cli::try_parse_from(["freedompath", "status"]).unwrap();

        assert!(guide.command.works_without_onboarding());
        assert!(!status.command.works_without_onboarding());
    }

    #[test]
    fn reset_without_confirmation_keeps_records() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("store")).unwrap();
        let mut app = AppState::load(&storage).unwrap();
        app.log_event(Some("Coffee"), None, 1_000);
        app.persist(&storage, 1_000).unwrap();

        assert!(cmd_reset(&mut app, &storage, false).is_err());
        assert_eq!(AppState::load(&storage).unwrap().journal().len(), 1);

        cmd_reset(&mut app, &storage, true).unwrap();
        assert!(AppState::load(&storage).unwrap().journal().is_empty());
    }
}
