//! Classification output

use crate::alerts::{ClinicalAlert, LabFlagEntry};
use crate::angiogenic::RatioInterpretation;
use crate::criteria::SeverityCriterion;
use crate::delivery::{DeliveryPlan, Urgency};
use crate::findings::Findings;
use crate::hellp::HellpAssessment;
use crate::ladder::{Diagnosis, Level};
use crate::management::{SurveillancePlan, Therapy};
use crate::record::GestationalAge;
use serde::{Deserialize, Serialize};

/// Everything the presenter shows for one record. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub diagnosis: Diagnosis,
    /// Human-readable diagnosis, shown verbatim
    pub diagnosis_label: String,
    pub level: Level,
    /// Matched criteria in display order
    pub severity_criteria: Vec<SeverityCriterion>,
    pub hellp: HellpAssessment,
    pub delivery: DeliveryPlan,
    /// Gestational age the decision was made with
    pub gestational_age: GestationalAge,
    pub proteinuria: bool,
    pub mean_arterial_pressure: f64,
    pub ratio: Option<f64>,
    pub ratio_interpretation: Option<RatioInterpretation>,
    pub lab_flags: Vec<LabFlagEntry>,
    pub alerts: Vec<ClinicalAlert>,
    pub surveillance: SurveillancePlan,
    pub therapy: Vec<Therapy>,
    /// Derived predicates, kept for audit
    pub findings: Findings,
}

impl Verdict {
    pub fn has_severity_criteria(&self) -> bool {
        !self.severity_criteria.is_empty()
    }

    /// Criterion descriptions in display order
    pub fn severity_descriptions(&self) -> Vec<&'static str> {
        self.severity_criteria.iter().map(|c| c.description()).collect()
    }

    pub fn urgency(&self) -> Option<Urgency> {
        self.delivery.urgency
    }

    /// Delivery is immediate or urgent
    pub fn requires_prompt_delivery(&self) -> bool {
        matches!(self.delivery.urgency, Some(Urgency::Immediate) | Some(Urgency::Urgent))
    }

    pub fn to_json(&self) -> Result<String, crate::HdpError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
