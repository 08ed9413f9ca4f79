//! Settings and onboarding commands.

use clap::{Subcommand, ValueEnum};

use crate::app::AppState;
use crate::model::{CURRENCIES, Currency, Language, Settings};
use crate::storage::Storage;

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings.
    Show,

    /// Change one setting.
    Set {
        #[arg(value_enum)]
        field: SettingField,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SettingField {
    /// Display language: en, ru, es.
    Language,
    /// Currency code, e.g. USD.
    Currency,
    /// Price of one pack.
    CostPerPack,
    /// Cigarettes per pack.
    PackSize,
    /// Your usual number a day, used until a baseline is measured.
    BaselinePerDay,
}

/// CLI-facing language, mapped to the domain `Language`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    En,
    Ru,
    Es,
}

impl LanguageArg {
    pub(super) fn to_domain(self) -> Language {
        match self {
            Self::En => Language::En,
            Self::Ru => Language::Ru,
            Self::Es => Language::Es,
        }
    }
}

/// Onboarding answers; anything left out keeps its current value.
#[derive(Debug, Default)]
pub(super) struct Onboarding {
    pub language: Option<LanguageArg>,
    pub currency: Option<String>,
    pub cost_per_pack: Option<f64>,
    pub pack_size: Option<f64>,
}

pub(super) fn cmd_show(settings: &Settings) -> Result<(), String> {
    println!("language          {}", settings.language.code());
    println!(
        "currency          {} ({})",
        settings.currency,
        settings.currency_symbol()
    );
    println!("cost-per-pack     {}", settings.cost_per_pack);
    println!("pack-size         {}", settings.pack_size);
    println!("baseline-per-day  {:.1}", settings.baseline_per_day);
    Ok(())
}

pub(super) fn cmd_set(
    app: &mut AppState,
    storage: &Storage,
    field: SettingField,
    value: &str,
) -> Result<(), String> {
    let mut updated = app.settings().clone();
    apply(&mut updated, field, value)?;
    app.update_settings(storage, |s| *s = updated)
        .map_err(|e| format!("failed to save settings: {e}"))?;
    cmd_show(app.settings())
}

pub(super) fn cmd_onboard(
    app: &mut AppState,
    storage: &Storage,
    answers: &Onboarding,
) -> Result<(), String> {
    let mut updated = app.settings().clone();
    if let Some(language) = answers.language {
        updated.language = language.to_domain();
    }
    if let Some(currency) = &answers.currency {
        apply(&mut updated, SettingField::Currency, currency)?;
    }
    if let Some(cost) = answers.cost_per_pack {
        updated.cost_per_pack = positive(cost, "cost-per-pack")?;
    }
    if let Some(size) = answers.pack_size {
        updated.pack_size = positive(size, "pack-size")?;
    }

    app.update_settings(storage, |s| *s = updated)
        .map_err(|e| format!("failed to save settings: {e}"))?;
    app.complete_onboarding(storage)
        .map_err(|e| format!("failed to complete onboarding: {e}"))?;

    eprintln!("You're all set. Log every cigarette for three days to start.");
    cmd_show(app.settings())
}

/// Parses `value` into `field`. The settings are untouched on error.
pub(super) fn apply(settings: &mut Settings, field: SettingField, value: &str) -> Result<(), String> {
    let value = value.trim();
    match field {
        SettingField::Language => {
            settings.language = LanguageArg::from_str(value, true)
                .map_err(|_| format!("unknown language '{value}' (expected en, ru, es)"))?
                .to_domain();
        }
        SettingField::Currency => {
            let currency = Currency::find(value).ok_or_else(|| {
                let codes: Vec<&str> = CURRENCIES.iter().map(|c| c.code).collect();
                format!("unsupported currency '{value}' (expected one of {})", codes.join(", "))
            })?;
            settings.currency = currency.code.to_string();
        }
        SettingField::CostPerPack => {
            settings.cost_per_pack = positive(parse_number(value)?, "cost-per-pack")?;
        }
        SettingField::PackSize => {
            settings.pack_size = positive(parse_number(value)?, "pack-size")?;
        }
        SettingField::BaselinePerDay => {
            let baseline = parse_number(value)?;
            if baseline < 0.0 {
                return Err("baseline-per-day cannot be negative".to_string());
            }
            settings.baseline_per_day = baseline;
        }
    }
    Ok(())
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{value}' is not a number"))
}

fn positive(value: f64, name: &str) -> Result<f64, String> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{name} must be greater than zero"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_language_is_case_insensitive() {
        let mut settings = Settings::default();
        apply(&mut settings, SettingField::Language, "EN").unwrap();
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn apply_currency_normalizes_code() {
        let mut settings = Settings::default();
        apply(&mut settings, SettingField::Currency, "thb").unwrap();
        assert_eq!(settings.currency, "THB");
        assert_eq!(settings.currency_symbol(), "฿");
    }

    #[test]
    fn apply_rejects_unsupported_currency() {
        let mut settings = Settings::default();
        let err = apply(&mut settings, SettingField::Currency, "BTC").unwrap_err();

        assert!(err.contains("RUB, USD"));
        assert_eq!(settings.currency, "RUB");
    }

    #[test]
    fn apply_pack_fields_must_be_positive() {
        let mut settings = Settings::default();
        apply(&mut settings, SettingField::CostPerPack, "350.5").unwrap();
        assert!((settings.cost_per_pack - 350.5).abs() < f64::EPSILON);

        assert!(apply(&mut settings, SettingField::PackSize, "0").is_err());
        assert!(apply(&mut settings, SettingField::PackSize, "lots").is_err());
        assert!(apply(&mut settings, SettingField::PackSize, "NaN").is_err());
        assert!((settings.pack_size - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn apply_baseline_allows_zero() {
        let mut settings = Settings {
            baseline_per_day: 12.0,
            ..Settings::default()
        };
        apply(&mut settings, SettingField::BaselinePerDay, "0").unwrap();
        assert!(settings.baseline_per_day.abs() < f64::EPSILON);

        assert!(apply(&mut settings, SettingField::BaselinePerDay, "-3").is_err());
    }
}
