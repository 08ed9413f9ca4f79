//! Recovery phases and their presentation metadata.

use serde::{Deserialize, Serialize};

use super::Language;

/// One of the five ordered stages of the reduction program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Observe and log as usual.
    #[serde(rename = "BASELINE")]
    Baseline,

    /// Tag the reasons behind each cigarette.
    #[serde(rename = "TRIGGER_ID")]
    TriggerId,

    /// Cut back toward four a day.
    #[serde(rename = "REDUCTION")]
    Reduction,

    /// Hold at four or fewer a day.
    #[serde(rename = "STABILIZE_4")]
    Stabilize4,

    /// A full day without a cigarette at the four-a-day level.
    #[serde(rename = "FREEDOM")]
    Freedom,
}

impl Phase {
    /// All phases in program order.
    pub const ALL: [Self; 5] = [
        Self::Baseline,
        Self::TriggerId,
        Self::Reduction,
        Self::Stabilize4,
        Self::Freedom,
    ];

    /// The canonical tag, as stored and as sent to the advisor.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Baseline => "BASELINE",
            Self::TriggerId => "TRIGGER_ID",
            Self::Reduction => "REDUCTION",
            Self::Stabilize4 => "STABILIZE_4",
            Self::Freedom => "FREEDOM",
        }
    }

    /// 1-based position in the program.
    pub fn ordinal(self) -> u8 {
        self.info().ordinal
    }

    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(usize::from(self.ordinal())).copied()
    }

    /// Fixed presentation record for this phase.
    pub fn info(self) -> &'static PhaseInfo {
        match self {
            Self::Baseline => &BASELINE_INFO,
            Self::TriggerId => &TRIGGER_ID_INFO,
            Self::Reduction => &REDUCTION_INFO,
            Self::Stabilize4 => &STABILIZE_4_INFO,
            Self::Freedom => &FREEDOM_INFO,
        }
    }
}

/// A string in each supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized {
    pub en: &'static str,
    pub ru: &'static str,
    pub es: &'static str,
}

impl Localized {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Ru => self.ru,
            Language::Es => self.es,
        }
    }
}

/// How a phase is presented. Kept apart from the engine: nothing in here
/// affects classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseInfo {
    pub ordinal: u8,
    pub title: Localized,
    pub description: Localized,
    /// Icon name from the UI's icon set.
    pub icon: &'static str,
    pub color: &'static str,
    /// What it takes to move on.
    pub condition: &'static str,
}

const BASELINE_INFO: PhaseInfo = PhaseInfo {
    ordinal: 1,
    title: Localized {
        en: "Baseline",
        ru: "Сбор данных",
        es: "Base",
    },
    description: Localized {
        en: "Learning habits. Just log every cigarette as usual.",
        ru: "Изучаем ваши привычки. Просто записывайте сигареты как обычно.",
        es: "Aprendiendo tus hábitos. Registra cada cigarrillo como siempre.",
    },
    icon: "activity",
    color: "blue",
    condition: "Keep logging for 3 days to start the analysis.",
};

const TRIGGER_ID_INFO: PhaseInfo = PhaseInfo {
    ordinal: 2,
    title: Localized {
        en: "Triggers",
        ru: "Поиск триггеров",
        es: "Disparadores",
    },
    description: Localized {
        en: "Focus on WHY. Awareness is the key.",
        ru: "Сосредоточьтесь на ПРИЧИНАХ. Осознанность — это ключ.",
        es: "Enfócate en POR QUÉ. La conciencia es la clave.",
    },
    icon: "brain",
    color: "purple",
    condition: "Tag a trigger on 10 cigarettes.",
};

const REDUCTION_INFO: PhaseInfo = PhaseInfo {
    ordinal: 3,
    title: Localized {
        en: "Reduction",
        ru: "Активное снижение",
        es: "Reducción",
    },
    description: Localized {
        en: "Time to cut back. Start with the doubles.",
        ru: "Пора снижать. Цель — на 10% меньше каждый день.",
        es: "Hora de reducir. Empieza por los dobles.",
    },
    icon: "target",
    color: "orange",
    condition: "Bring your 3-day average down to 4 a day.",
};

const STABILIZE_4_INFO: PhaseInfo = PhaseInfo {
    ordinal: 4,
    title: Localized {
        en: "Final Four",
        ru: "Правило четырех",
        es: "Cuatro Finales",
    },
    description: Localized {
        en: "Morning free. First one 6h after wake up.",
        ru: "Утро без сигарет. Первая — спустя 6 часов после пробуждения.",
        es: "Mañana libre. Primero 6h después de despertar.",
    },
    icon: "wind",
    color: "teal",
    condition: "Stay at 4 or fewer a day and go 24 hours without one.",
};

const FREEDOM_INFO: PhaseInfo = PhaseInfo {
    ordinal: 5,
    title: Localized {
        en: "Freedom",
        ru: "Полная свобода",
        es: "Libertad",
    },
    description: Localized {
        en: "Pure Freedom. You decide whether to keep a minimum or quit for good.",
        ru: "Привычка побеждена. Вы сами решаете, оставить ли минимум или бросить совсем.",
        es: "Libertad Pura. Tú decides si mantener un mínimo o dejarlo del todo.",
    },
    icon: "check-circle",
    color: "green",
    condition: "You are in control. Choose your path.",
};

/// Output of the phase engine. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseState {
    pub phase: Phase,

    /// Progress toward the next phase, in `[0, 100]`.
    pub progress: f64,

    /// Average events per day over the first three days, or 0 until known.
    pub calculated_baseline: f64,
}
