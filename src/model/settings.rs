//! User settings: language, pricing, and the trigger vocabulary.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Ru,
    Es,
}

impl Language {
    /// Built-in trigger vocabulary offered when logging.
    pub fn default_triggers(self) -> &'static [&'static str] {
        match self {
            Self::En => &[
                "Stress", "Coffee", "After meal", "Boredom", "Alcohol", "Socializing", "Driving",
                "Morning", "Work", "Walk",
            ],
            Self::Ru => &[
                "Стресс",
                "Кофе",
                "После еды",
                "Скука",
                "Алкоголь",
                "Общение",
                "За рулем",
                "Утро",
                "Работа",
                "Прогулка",
            ],
            Self::Es => &[
                "Estrés", "Café", "Después de comer", "Aburrimiento", "Alcohol", "Social",
                "Conduciendo", "Mañana", "Trabajo", "Paseo",
            ],
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Es => "es",
        }
    }
}

/// A supported currency and its display symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
}

pub const CURRENCIES: &[Currency] = &[
    Currency { code: "RUB", symbol: "₽" },
    Currency { code: "USD", symbol: "$" },
    Currency { code: "EUR", symbol: "€" },
    Currency { code: "THB", symbol: "฿" },
    Currency { code: "GBP", symbol: "£" },
    Currency { code: "JPY", symbol: "¥" },
    Currency { code: "CNY", symbol: "¥" },
];

impl Currency {
    /// Looks up a supported currency by code, case-insensitively.
    pub fn find(code: &str) -> Option<Self> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .copied()
    }
}

/// User settings, persisted as a single record.
///
/// Every field has a default, so a stored record missing fields merges
/// over the defaults when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub language: Language,
    pub currency: String,
    pub cost_per_pack: f64,
    pub pack_size: f64,

    /// Fallback baseline, used when the engine has not computed one yet.
    pub baseline_per_day: f64,

    /// User-added trigger labels, deduplicated, in insertion order.
    pub custom_triggers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::Ru,
            currency: "RUB".to_string(),
            cost_per_pack: 200.0,
            pack_size: 20.0,
            baseline_per_day: 0.0,
            custom_triggers: Vec::new(),
        }
    }
}

impl Settings {
    /// Adds a custom trigger. Blank labels are ignored, duplicates collapse.
    ///
    /// Returns whether the vocabulary changed.
    pub fn add_custom_trigger(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.custom_triggers.iter().any(|t| t == name) {
            return false;
        }
        self.custom_triggers.push(name.to_string());
        true
    }

    /// Removes a custom trigger. Returns whether it was present.
    pub fn remove_custom_trigger(&mut self, name: &str) -> bool {
        let before = self.custom_triggers.len();
        self.custom_triggers.retain(|t| t != name.trim());
        self.custom_triggers.len() != before
    }

    /// Built-in triggers for the current language followed by custom ones.
    pub fn trigger_vocabulary(&self) -> Vec<String> {
        self.language
            .default_triggers()
            .iter()
            .map(|t| (*t).to_string())
            .chain(self.custom_triggers.iter().cloned())
            .collect()
    }

    /// Display symbol for the configured currency, falling back to the code.
    pub fn currency_symbol(&self) -> &str {
        Currency::find(&self.currency).map_or(self.currency.as_str(), |c| c.symbol)
    }

    /// Price of one cigarette, or 0 when the pack size is not positive.
    pub fn cost_per_cigarette(&self) -> f64 {
        if self.pack_size > 0.0 {
            self.cost_per_pack / self.pack_size
        } else {
            0.0
        }
    }
}
