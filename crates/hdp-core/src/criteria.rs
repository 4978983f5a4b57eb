//! Severity criteria
//!
//! Ordered list of matched criteria. The order only matters for display; a
//! non-empty list separates the "with" and "without severity criteria"
//! variants of the same diagnosis.

use crate::findings::Findings;
use crate::record::Symptoms;
use serde::{Deserialize, Serialize};

/// A criterion of severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityCriterion {
    SevereHypertension,
    Thrombocytopenia,
    LiverDysfunction,
    RenalInsufficiency,
    PulmonaryEdema,
    SevereHeadache,
    VisualDisturbance,
    AlteredConsciousness,
    EpigastricPain,
    AngiogenicImbalance,
}

impl SeverityCriterion {
    /// Display order
    pub const ALL: [SeverityCriterion; 10] = [
        SeverityCriterion::SevereHypertension,
        SeverityCriterion::Thrombocytopenia,
        SeverityCriterion::LiverDysfunction,
        SeverityCriterion::RenalInsufficiency,
        SeverityCriterion::PulmonaryEdema,
        SeverityCriterion::SevereHeadache,
        SeverityCriterion::VisualDisturbance,
        SeverityCriterion::AlteredConsciousness,
        SeverityCriterion::EpigastricPain,
        SeverityCriterion::AngiogenicImbalance,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            SeverityCriterion::SevereHypertension => "Severe hypertension (≥160/110)",
            SeverityCriterion::Thrombocytopenia => "Thrombocytopenia (<100,000)",
            SeverityCriterion::LiverDysfunction => "Liver dysfunction (transaminases ≥2×ULN)",
            SeverityCriterion::RenalInsufficiency => "Renal insufficiency (Cr >1.1)",
            SeverityCriterion::PulmonaryEdema => "Pulmonary edema",
            SeverityCriterion::SevereHeadache => "Severe/persistent headache",
            SeverityCriterion::VisualDisturbance => "Visual disturbance",
            SeverityCriterion::AlteredConsciousness => "Altered consciousness",
            SeverityCriterion::EpigastricPain => "Epigastric/right upper quadrant pain",
            SeverityCriterion::AngiogenicImbalance => "Angiogenic imbalance (elevated sFlt-1/PlGF)",
        }
    }

    fn is_met(&self, findings: &Findings, symptoms: &Symptoms) -> bool {
        match self {
            SeverityCriterion::SevereHypertension => findings.severe_hypertension,
            SeverityCriterion::Thrombocytopenia => findings.thrombocytopenia,
            SeverityCriterion::LiverDysfunction => findings.liver_dysfunction,
            SeverityCriterion::RenalInsufficiency => findings.renal_insufficiency,
            SeverityCriterion::PulmonaryEdema => symptoms.pulmonary_edema,
            SeverityCriterion::SevereHeadache => symptoms.severe_headache,
            SeverityCriterion::VisualDisturbance => symptoms.visual_disturbance,
            SeverityCriterion::AlteredConsciousness => symptoms.altered_consciousness,
            SeverityCriterion::EpigastricPain => symptoms.epigastric_pain,
            SeverityCriterion::AngiogenicImbalance => findings.angiogenic_imbalance,
        }
    }
}

impl std::fmt::Display for SeverityCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Matched criteria, in display order
pub fn severity_criteria(findings: &Findings, symptoms: &Symptoms) -> Vec<SeverityCriterion> {
    SeverityCriterion::ALL
        .iter()
        .copied()
        .filter(|criterion| criterion.is_met(findings, symptoms))
        .collect()
}
