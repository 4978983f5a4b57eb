//! Protocol thresholds
//!
//! Every numeric cutoff the classifier applies lives here, so a protocol
//! revision touches one table. Gestational-age dependent values are kept as
//! small lookup tables keyed by the lower bound of an age bracket.

use crate::record::{Dipstick, GestationalAge};
use crate::HdpError;
use serde::{Deserialize, Serialize};

/// Systolic/diastolic pair; either limit reached counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureThreshold {
    pub systolic: f64,
    pub diastolic: f64,
}

/// Any one criterion is enough for proteinuria
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinuriaThresholds {
    /// Protein/creatinine ratio, inclusive
    pub protein_creatinine_ratio: f64,
    /// 24h protein in mg, inclusive
    pub protein_24h_mg: f64,
    /// Lowest positive dipstick category
    pub dipstick: Dipstick,
}

/// sFlt-1/PlGF band limits (inclusive upper bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioBands {
    pub unlikely_max: f64,
    pub intermediate_max: f64,
    pub likely_max: f64,
}

/// One row of the angiogenic lookup table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngiogenicBracket {
    /// Row applies from this gestational age (weeks, inclusive)
    pub from_weeks: f64,
    /// Ratio at or above which angiogenic imbalance is present
    pub imbalance_at: f64,
    pub bands: RatioBands,
}

/// Gestational age cutoffs and ratio limits used for delivery timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCutoffs {
    /// Lower limit for expectant management in severe disease
    pub viability_weeks: f64,
    /// Late preterm boundary
    pub late_preterm_weeks: f64,
    pub term_weeks: f64,
    /// Ratio above which termination is considered between late preterm and term
    pub late_preterm_ratio: f64,
    /// Ratio above which the ≤48h warning fires before `late_preterm_weeks`
    pub override_ratio: f64,
}

/// Display-only lab grading (alert / critical)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabFlagThresholds {
    pub platelets_alert: f64,
    pub platelets_critical: f64,
    pub creatinine_alert: f64,
    pub creatinine_critical: f64,
    pub ldh_alert: f64,
    pub ldh_critical: f64,
}

/// Complete protocol configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protocol {
    pub hypertension: PressureThreshold,
    pub severe_hypertension: PressureThreshold,
    pub proteinuria: ProteinuriaThresholds,
    /// Thrombocytopenia strictly below this count (×10³/µL)
    pub platelets_below: f64,
    /// Renal insufficiency strictly above this creatinine (mg/dL)
    pub creatinine_above: f64,
    /// AST/ALT upper limit of normal when the lab does not supply one
    pub default_transaminase_uln: f64,
    /// Liver dysfunction at this multiple of the ULN
    pub transaminase_uln_multiple: f64,
    /// Hemolysis at or above this LDH (U/L)
    pub ldh_hemolysis: f64,
    /// Haptoglobin strictly below this supports hemolysis (mg/dL)
    pub haptoglobin_below: f64,
    /// Placental dysfunction below this fetal weight percentile
    pub fetal_weight_percentile_below: f64,
    /// Severe growth restriction below this percentile
    pub fetal_weight_percentile_severe_below: f64,
    /// Sorted by `from_weeks`
    pub angiogenic: Vec<AngiogenicBracket>,
    pub delivery: DeliveryCutoffs,
    pub lab_flags: LabFlagThresholds,
}

impl Default for Protocol {
    fn default() -> Self {
        Protocol {
            hypertension: PressureThreshold {
                systolic: 140.0,
                diastolic: 90.0,
            },
            severe_hypertension: PressureThreshold {
                systolic: 160.0,
                diastolic: 110.0,
            },
            proteinuria: ProteinuriaThresholds {
                protein_creatinine_ratio: 0.3,
                protein_24h_mg: 300.0,
                dipstick: Dipstick::Plus2,
            },
            platelets_below: 100.0,
            creatinine_above: 1.1,
            default_transaminase_uln: 40.0,
            transaminase_uln_multiple: 2.0,
            ldh_hemolysis: 600.0,
            haptoglobin_below: 30.0,
            fetal_weight_percentile_below: 10.0,
            fetal_weight_percentile_severe_below: 3.0,
            angiogenic: vec![
                AngiogenicBracket {
                    from_weeks: 0.0,
                    imbalance_at: 85.0,
                    bands: RatioBands {
                        unlikely_max: 38.0,
                        intermediate_max: 85.0,
                        likely_max: 655.0,
                    },
                },
                AngiogenicBracket {
                    from_weeks: 34.0,
                    imbalance_at: 110.0,
                    bands: RatioBands {
                        unlikely_max: 38.0,
                        intermediate_max: 110.0,
                        likely_max: 201.0,
                    },
                },
            ],
            delivery: DeliveryCutoffs {
                viability_weeks: 24.0,
                late_preterm_weeks: 34.0,
                term_weeks: 37.0,
                late_preterm_ratio: 201.0,
                override_ratio: 655.0,
            },
            lab_flags: LabFlagThresholds {
                platelets_alert: 150.0,
                platelets_critical: 100.0,
                creatinine_alert: 0.9,
                creatinine_critical: 1.1,
                ldh_alert: 400.0,
                ldh_critical: 600.0,
            },
        }
    }
}

impl Protocol {
    /// Parse and validate a protocol from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, HdpError> {
        let protocol: Protocol = serde_json::from_str(json)?;
        protocol.validate()?;
        Ok(protocol)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, HdpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject thresholds the classifier cannot apply meaningfully
    pub fn validate(&self) -> Result<(), HdpError> {
        let positive = [
            ("hypertension.systolic", self.hypertension.systolic),
            ("hypertension.diastolic", self.hypertension.diastolic),
            ("severe_hypertension.systolic", self.severe_hypertension.systolic),
            ("severe_hypertension.diastolic", self.severe_hypertension.diastolic),
            ("proteinuria.protein_creatinine_ratio", self.proteinuria.protein_creatinine_ratio),
            ("proteinuria.protein_24h_mg", self.proteinuria.protein_24h_mg),
            ("platelets_below", self.platelets_below),
            ("creatinine_above", self.creatinine_above),
            ("default_transaminase_uln", self.default_transaminase_uln),
            ("transaminase_uln_multiple", self.transaminase_uln_multiple),
            ("ldh_hemolysis", self.ldh_hemolysis),
            ("haptoglobin_below", self.haptoglobin_below),
            ("fetal_weight_percentile_below", self.fetal_weight_percentile_below),
            ("delivery.late_preterm_ratio", self.delivery.late_preterm_ratio),
            ("delivery.override_ratio", self.delivery.override_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HdpError::InvalidProtocol(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.severe_hypertension.systolic < self.hypertension.systolic
            || self.severe_hypertension.diastolic < self.hypertension.diastolic
        {
            return Err(HdpError::InvalidProtocol(
                "Severe hypertension thresholds must not be below hypertension thresholds".to_string(),
            ));
        }

        let d = &self.delivery;
        if !(d.viability_weeks < d.late_preterm_weeks && d.late_preterm_weeks < d.term_weeks) {
            return Err(HdpError::InvalidProtocol(format!(
                "Delivery cutoffs must ascend: {} < {} < {}",
                d.viability_weeks, d.late_preterm_weeks, d.term_weeks
            )));
        }

        if self.angiogenic.is_empty() {
            return Err(HdpError::InvalidProtocol(
                "At least one angiogenic bracket is required".to_string(),
            ));
        }
        if let Some(first) = self.angiogenic.first() {
            if !(first.from_weeks <= 0.0) {
                return Err(HdpError::InvalidProtocol(format!(
                    "First angiogenic bracket must start at 0 weeks, got {}",
                    first.from_weeks
                )));
            }
        }
        for pair in self.angiogenic.windows(2) {
            if pair[0].from_weeks >= pair[1].from_weeks {
                return Err(HdpError::InvalidProtocol(
                    "Angiogenic brackets must be sorted by strictly ascending from_weeks".to_string(),
                ));
            }
        }
        for bracket in &self.angiogenic {
            let b = &bracket.bands;
            if !(b.unlikely_max <= b.intermediate_max && b.intermediate_max <= b.likely_max) {
                return Err(HdpError::InvalidProtocol(format!(
                    "Ratio bands from {} weeks must ascend",
                    bracket.from_weeks
                )));
            }
        }

        Ok(())
    }

    /// Angiogenic row for a gestational age: the last bracket starting at or before it
    pub fn angiogenic_bracket(&self, ga: GestationalAge) -> Option<&AngiogenicBracket> {
        self.angiogenic
            .iter()
            .rev()
            .find(|bracket| ga.is_at_least(bracket.from_weeks))
    }

    /// Effective AST/ALT upper limit of normal
    pub fn transaminase_uln(&self, lab_uln: Option<f64>) -> f64 {
        match lab_uln {
            Some(uln) if uln > 0.0 => uln,
            _ => self.default_transaminase_uln,
        }
    }
}
