//! sFlt-1/PlGF ratio
//!
//! Resolution of the ratio from the lab panel and its gestational-age
//! dependent interpretation.

use crate::protocol::Protocol;
use crate::record::{GestationalAge, LabPanel};
use serde::{Deserialize, Serialize};

/// Resolve the ratio: a positive manual entry first, else sFlt-1 / PlGF when PlGF > 0
pub fn resolve_ratio(labs: &LabPanel) -> Option<f64> {
    if let Some(manual) = labs.sflt1_plgf_ratio.filter(|r| *r > 0.0) {
        return Some(manual);
    }
    match (labs.sflt1, labs.plgf) {
        (Some(sflt1), Some(plgf)) if plgf > 0.0 => Some(sflt1 / plgf),
        _ => None,
    }
}

/// Ratio at or above the imbalance cutoff of the age bracket
pub fn has_angiogenic_imbalance(ratio: Option<f64>, ga: GestationalAge, protocol: &Protocol) -> bool {
    match (ratio, protocol.angiogenic_bracket(ga)) {
        (Some(ratio), Some(bracket)) => ratio >= bracket.imbalance_at,
        _ => false,
    }
}

/// Interpretation band of a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioBand {
    /// Preeclampsia unlikely within one week
    Unlikely,
    /// Inconclusive
    Intermediate,
    /// Preeclampsia likely
    Likely,
    /// Delivery probably needed within 48h
    VeryHighRisk,
}

impl RatioBand {
    pub fn color(&self) -> &'static str {
        match self {
            RatioBand::Unlikely => "green",
            RatioBand::Intermediate => "yellow",
            RatioBand::Likely => "orange",
            RatioBand::VeryHighRisk => "red",
        }
    }
}

/// Band plus the advice attached to it for the current age bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioInterpretation {
    pub ratio: f64,
    pub band: RatioBand,
    pub summary: String,
    pub detail: String,
    pub conduct: String,
}

/// Interpret a ratio. `None` when the ratio is unknown or no bracket applies.
pub fn interpret(ratio: Option<f64>, ga: GestationalAge, protocol: &Protocol) -> Option<RatioInterpretation> {
    let ratio = ratio?;
    if ratio.is_nan() {
        return None;
    }
    let bands = protocol.angiogenic_bracket(ga)?.bands;
    let preterm = ga.is_before(protocol.delivery.late_preterm_weeks);

    let band = if ratio <= bands.unlikely_max {
        RatioBand::Unlikely
    } else if ratio <= bands.intermediate_max {
        RatioBand::Intermediate
    } else if ratio <= bands.likely_max {
        RatioBand::Likely
    } else {
        RatioBand::VeryHighRisk
    };

    let (summary, detail, conduct) = match (band, preterm) {
        (RatioBand::Unlikely, true) => (
            "Preeclampsia unlikely within 1 week",
            "NPV 99.3%: reassure",
            "Outpatient surveillance; repeat in 1-2 weeks if clinical suspicion persists",
        ),
        (RatioBand::Unlikely, false) => (
            "Preeclampsia unlikely within 1 week",
            "NPV 99.3%",
            "Reassure",
        ),
        (RatioBand::Intermediate, true) => ("Intermediate zone", "Inconclusive", "Reassess in 1 week"),
        (RatioBand::Intermediate, false) => (
            "Intermediate zone",
            "Inconclusive",
            "Consider induction beyond 37 weeks",
        ),
        (RatioBand::Likely, true) => (
            "Preeclampsia likely",
            "Risk of adverse outcomes within 4 weeks",
            "Admission",
        ),
        (RatioBand::Likely, false) => ("Preeclampsia likely", "High risk", "Admission"),
        (RatioBand::VeryHighRisk, true) => (
            "Very high risk",
            "Delivery probably needed within 48h",
            "Admission and immediate fetal lung maturation",
        ),
        (RatioBand::VeryHighRisk, false) => (
            "Very high risk",
            "Delivery probably needed within 48h",
            "Admission; termination if 34 to 36+6 weeks",
        ),
    };

    Some(RatioInterpretation {
        ratio,
        band,
        summary: summary.to_string(),
        detail: detail.to_string(),
        conduct: conduct.to_string(),
    })
}
