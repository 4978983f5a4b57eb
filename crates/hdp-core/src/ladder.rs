//! Diagnosis ladder
//!
//! An ordered table of rules evaluated top-down; the first rule whose
//! condition holds decides the diagnosis and level. Eclampsia and HELLP sit
//! above every blood-pressure driven rule, so they win regardless of readings.

use crate::findings::Findings;
use crate::hellp::HellpAssessment;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Diagnosis and level
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diagnosis {
    Eclampsia,
    CompleteHellp,
    PartialHellp,
    SuperimposedPreeclampsia,
    PreeclampsiaWithSevereFeatures,
    PreeclampsiaWithoutSevereFeatures,
    GestationalHypertension,
    NoHypertension,
    IncompleteAssessment,
}

impl Diagnosis {
    pub fn label(&self) -> &'static str {
        match self {
            Diagnosis::Eclampsia => "Eclampsia",
            Diagnosis::CompleteHellp => "Complete HELLP syndrome",
            Diagnosis::PartialHellp => "Partial HELLP syndrome",
            Diagnosis::SuperimposedPreeclampsia => {
                "Superimposed preeclampsia on chronic hypertension"
            }
            Diagnosis::PreeclampsiaWithSevereFeatures => "Preeclampsia with severity criteria",
            Diagnosis::PreeclampsiaWithoutSevereFeatures => "Preeclampsia without severity criteria",
            Diagnosis::GestationalHypertension => "Gestational hypertension",
            Diagnosis::NoHypertension => "No hypertension in this assessment",
            Diagnosis::IncompleteAssessment => "Incomplete assessment",
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Severity level: normal < mild < moderate < severe < critical.
///
/// `Unknown` is outside the scale and compares only with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Unknown,
    Normal,
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl Level {
    /// Position on the ordinal scale
    pub fn rank(&self) -> Option<u8> {
        match self {
            Level::Unknown => None,
            Level::Normal => Some(0),
            Level::Mild => Some(1),
            Level::Moderate => Some(2),
            Level::Severe => Some(3),
            Level::Critical => Some(4),
        }
    }

    /// Severe or critical
    pub fn is_severe_or_worse(&self) -> bool {
        matches!(self, Level::Severe | Level::Critical)
    }

    pub fn color(&self) -> &'static str {
        match self {
            Level::Unknown => "muted",
            Level::Normal => "green",
            Level::Mild => "yellow",
            Level::Moderate => "orange",
            Level::Severe | Level::Critical => "red",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Unknown => "unknown",
            Level::Normal => "normal",
            Level::Mild => "mild",
            Level::Moderate => "moderate",
            Level::Severe => "severe",
            Level::Critical => "critical",
        }
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Rule table
// ============================================================================

/// Everything the ladder reads
#[derive(Debug, Clone, Copy)]
pub struct LadderInput<'a> {
    pub findings: &'a Findings,
    pub hellp: &'a HellpAssessment,
    pub chronic_hypertension: bool,
    /// Severity criteria list is non-empty
    pub has_severity_criteria: bool,
}

/// Diagnosis and level decided by one rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderOutcome {
    pub diagnosis: Diagnosis,
    pub level: Level,
    /// Name of the rule that matched
    pub rule: &'static str,
}

/// One rung of the ladder
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&LadderInput<'_>) -> bool,
    pub decide: fn(&LadderInput<'_>) -> (Diagnosis, Level),
}

/// Rules in strict priority order
pub const RULES: &[Rule] = &[
    Rule {
        name: "eclampsia",
        applies: |input| input.findings.convulsions,
        decide: |_| (Diagnosis::Eclampsia, Level::Critical),
    },
    Rule {
        name: "complete_hellp",
        applies: |input| input.hellp.complete,
        decide: |_| (Diagnosis::CompleteHellp, Level::Critical),
    },
    Rule {
        name: "partial_hellp",
        applies: |input| input.hellp.partial && input.findings.hypertension,
        decide: |_| (Diagnosis::PartialHellp, Level::Critical),
    },
    Rule {
        name: "superimposed_preeclampsia",
        applies: |input| {
            let f = input.findings;
            input.chronic_hypertension
                && f.hypertension
                && (f.proteinuria || f.organ_dysfunction || f.angiogenic_imbalance)
        },
        decide: |input| {
            let level = if input.has_severity_criteria {
                Level::Severe
            } else {
                Level::Moderate
            };
            (Diagnosis::SuperimposedPreeclampsia, level)
        },
    },
    Rule {
        name: "preeclampsia",
        applies: |input| {
            let f = input.findings;
            f.hypertension
                && (f.proteinuria
                    || f.organ_dysfunction
                    || f.angiogenic_imbalance
                    || f.placental_dysfunction)
        },
        decide: |input| {
            if input.has_severity_criteria {
                (Diagnosis::PreeclampsiaWithSevereFeatures, Level::Severe)
            } else {
                (Diagnosis::PreeclampsiaWithoutSevereFeatures, Level::Moderate)
            }
        },
    },
    Rule {
        name: "gestational_hypertension",
        applies: |input| {
            let f = input.findings;
            f.hypertension && !f.proteinuria && !f.organ_dysfunction
        },
        decide: |_| (Diagnosis::GestationalHypertension, Level::Mild),
    },
    Rule {
        name: "no_hypertension",
        applies: |input| !input.findings.hypertension,
        decide: |_| (Diagnosis::NoHypertension, Level::Normal),
    },
];

/// Rule name reported when nothing in [`RULES`] matches
pub const FALLBACK_RULE: &str = "incomplete_assessment";

/// Outcome used when no rule matches
///
/// The rules above partition every record on `hypertension`, so this is a
/// dead path kept as a guard.
pub fn fallback() -> LadderOutcome {
    LadderOutcome {
        diagnosis: Diagnosis::IncompleteAssessment,
        level: Level::Unknown,
        rule: FALLBACK_RULE,
    }
}

/// Walk the ladder; first match wins
pub fn evaluate(input: &LadderInput<'_>) -> LadderOutcome {
    match RULES.iter().find(|rule| (rule.applies)(input)) {
        Some(rule) => {
            let (diagnosis, level) = (rule.decide)(input);
            log::debug!("ladder rule '{}' matched: {} ({})", rule.name, diagnosis, level);
            LadderOutcome {
                diagnosis,
                level,
                rule: rule.name,
            }
        }
        None => {
            log::warn!("no ladder rule matched; reporting incomplete assessment");
            fallback()
        }
    }
}
