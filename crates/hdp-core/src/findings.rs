//! Predicate derivation
//!
//! Each finding is an independent boolean computed from raw values. A missing
//! value leaves its finding unmet; it is never read as zero. Comparisons
//! against NaN are false, so malformed numbers fail their predicate too.

use crate::angiogenic;
use crate::protocol::Protocol;
use crate::record::{ClinicalRecord, EndDiastolicFlow, FetalAssessment, LabPanel, MeanBloodPressure, Symptoms};
use serde::{Deserialize, Serialize};

/// The derived predicate set of one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub hypertension: bool,
    pub severe_hypertension: bool,
    pub proteinuria: bool,
    pub thrombocytopenia: bool,
    pub renal_insufficiency: bool,
    pub liver_dysfunction: bool,
    pub hemolysis: bool,
    pub clinical_severity: bool,
    pub pulmonary_edema: bool,
    pub convulsions: bool,
    /// Resolved sFlt-1/PlGF ratio, if known
    pub ratio: Option<f64>,
    pub angiogenic_imbalance: bool,
    pub organ_dysfunction: bool,
    pub placental_dysfunction: bool,
}

impl Findings {
    /// Derive every predicate from a record
    pub fn derive(record: &ClinicalRecord, protocol: &Protocol) -> Self {
        let labs = &record.labs;
        let symptoms = &record.symptoms;

        let thrombocytopenia = has_thrombocytopenia(labs, protocol);
        let renal_insufficiency = has_renal_insufficiency(labs, protocol);
        let liver_dysfunction = has_liver_dysfunction(labs, protocol);
        let clinical_severity = has_clinical_severity(symptoms);

        let ratio = angiogenic::resolve_ratio(labs);
        let angiogenic_imbalance =
            angiogenic::has_angiogenic_imbalance(ratio, record.gestational_age, protocol);

        Findings {
            hypertension: has_hypertension(&record.blood_pressure, protocol),
            severe_hypertension: has_severe_hypertension(&record.blood_pressure, protocol),
            proteinuria: has_proteinuria(labs, protocol),
            thrombocytopenia,
            renal_insufficiency,
            liver_dysfunction,
            hemolysis: has_hemolysis(labs, protocol),
            clinical_severity,
            pulmonary_edema: symptoms.pulmonary_edema,
            convulsions: symptoms.convulsions,
            ratio,
            angiogenic_imbalance,
            organ_dysfunction: thrombocytopenia
                || renal_insufficiency
                || liver_dysfunction
                || symptoms.pulmonary_edema
                || clinical_severity,
            placental_dysfunction: has_placental_dysfunction(&record.fetal, protocol),
        }
    }
}

/// Systolic ≥ 140 or diastolic ≥ 90
pub fn has_hypertension(bp: &MeanBloodPressure, protocol: &Protocol) -> bool {
    bp.systolic >= protocol.hypertension.systolic || bp.diastolic >= protocol.hypertension.diastolic
}

/// Systolic ≥ 160 or diastolic ≥ 110
pub fn has_severe_hypertension(bp: &MeanBloodPressure, protocol: &Protocol) -> bool {
    bp.systolic >= protocol.severe_hypertension.systolic
        || bp.diastolic >= protocol.severe_hypertension.diastolic
}

/// P/C ratio ≥ 0.3, 24h protein ≥ 300 mg, or dipstick ≥ 2+
pub fn has_proteinuria(labs: &LabPanel, protocol: &Protocol) -> bool {
    let t = &protocol.proteinuria;
    labs.protein_creatinine_ratio.map_or(false, |pc| pc >= t.protein_creatinine_ratio)
        || labs.proteinuria_24h.map_or(false, |mg| mg >= t.protein_24h_mg)
        || labs.dipstick.map_or(false, |d| d >= t.dipstick)
}

pub fn has_thrombocytopenia(labs: &LabPanel, protocol: &Protocol) -> bool {
    labs.platelets.map_or(false, |p| p < protocol.platelets_below)
}

pub fn has_renal_insufficiency(labs: &LabPanel, protocol: &Protocol) -> bool {
    labs.creatinine.map_or(false, |cr| cr > protocol.creatinine_above)
}

/// AST or ALT at or above the ULN multiple
pub fn has_liver_dysfunction(labs: &LabPanel, protocol: &Protocol) -> bool {
    let limit = protocol.transaminase_uln_multiple * protocol.transaminase_uln(labs.transaminase_uln);
    labs.ast.map_or(false, |ast| ast >= limit) || labs.alt.map_or(false, |alt| alt >= limit)
}

/// LDH ≥ 600 with low or unmeasured haptoglobin
///
/// An unmeasured haptoglobin does not rule hemolysis out.
pub fn has_hemolysis(labs: &LabPanel, protocol: &Protocol) -> bool {
    let ldh_high = labs.ldh.map_or(false, |ldh| ldh >= protocol.ldh_hemolysis);
    let haptoglobin_low = labs
        .haptoglobin
        .map_or(true, |hp| hp < protocol.haptoglobin_below);
    ldh_high && haptoglobin_low
}

/// Any neurological, epigastric or pulmonary severity symptom
pub fn has_clinical_severity(symptoms: &Symptoms) -> bool {
    symptoms.severe_headache
        || symptoms.visual_disturbance
        || symptoms.altered_consciousness
        || symptoms.epigastric_pain
        || symptoms.pulmonary_edema
}

/// Growth below the 10th percentile or absent/reversed umbilical flow
pub fn has_placental_dysfunction(fetal: &FetalAssessment, protocol: &Protocol) -> bool {
    let small = fetal
        .weight_percentile
        .map_or(false, |p| p < protocol.fetal_weight_percentile_below);
    let abnormal_flow = matches!(
        fetal.umbilical_flow,
        Some(EndDiastolicFlow::Absent) | Some(EndDiastolicFlow::Reversed)
    );
    small || abnormal_flow
}
