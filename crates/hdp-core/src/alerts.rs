//! Lab grading and clinical alerts
//!
//! Display-oriented signals that sit next to the diagnosis. None of them feed
//! back into the ladder.

use crate::protocol::Protocol;
use crate::record::{ClinicalRecord, DuctusVenosusWave, EndDiastolicFlow};
use serde::{Deserialize, Serialize};

/// Three-step lab grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabFlag {
    Normal,
    Alert,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyte {
    Platelets,
    Ast,
    Alt,
    Creatinine,
    Ldh,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabFlagEntry {
    pub analyte: Analyte,
    pub value: f64,
    pub flag: LabFlag,
}

enum Direction {
    /// Worse as the value rises
    Above,
    /// Worse as the value falls
    Below,
}

fn grade(value: f64, alert: f64, critical: f64, direction: Direction) -> LabFlag {
    match direction {
        Direction::Above if value >= critical => LabFlag::Critical,
        Direction::Above if value >= alert => LabFlag::Alert,
        Direction::Below if value <= critical => LabFlag::Critical,
        Direction::Below if value <= alert => LabFlag::Alert,
        _ => LabFlag::Normal,
    }
}

/// Grade every measured analyte; unmeasured ones are skipped
pub fn lab_flags(record: &ClinicalRecord, protocol: &Protocol) -> Vec<LabFlagEntry> {
    let labs = &record.labs;
    let t = &protocol.lab_flags;
    let uln = protocol.transaminase_uln(labs.transaminase_uln);
    let uln_critical = uln * protocol.transaminase_uln_multiple;

    let graded = [
        (Analyte::Platelets, labs.platelets, t.platelets_alert, t.platelets_critical, Direction::Below),
        (Analyte::Ast, labs.ast, uln, uln_critical, Direction::Above),
        (Analyte::Alt, labs.alt, uln, uln_critical, Direction::Above),
        (Analyte::Creatinine, labs.creatinine, t.creatinine_alert, t.creatinine_critical, Direction::Above),
        (Analyte::Ldh, labs.ldh, t.ldh_alert, t.ldh_critical, Direction::Above),
    ];

    graded
        .into_iter()
        .filter_map(|(analyte, value, alert, critical, direction)| {
            value.map(|value| LabFlagEntry {
                analyte,
                value,
                flag: grade(value, alert, critical, direction),
            })
        })
        .collect()
}

/// Alerts raised from fetal data and history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalAlert {
    /// Estimated fetal weight below the 3rd percentile
    SevereGrowthRestriction,
    /// Estimated fetal weight below the 10th percentile
    GrowthRestriction,
    ReversedUmbilicalFlow,
    ReversedDuctusVenosus,
    /// Convulsions in a patient with known epilepsy
    EpilepsyWithConvulsions,
}

impl ClinicalAlert {
    pub fn message(&self) -> &'static str {
        match self {
            ClinicalAlert::SevereGrowthRestriction => "EFW < p3: severe fetal growth restriction",
            ClinicalAlert::GrowthRestriction => "EFW < p10: evaluate fetal Doppler",
            ClinicalAlert::ReversedUmbilicalFlow => {
                "Reversed end-diastolic flow in the umbilical artery: consider urgent delivery"
            }
            ClinicalAlert::ReversedDuctusVenosus => {
                "Reversed a-wave in the ductus venosus: imminent fetal cardiac decompensation"
            }
            ClinicalAlert::EpilepsyWithConvulsions => {
                "Known epilepsy: exclude an epileptic seizure before confirming eclampsia"
            }
        }
    }

    /// Needs action now rather than at the next review
    pub fn is_critical(&self) -> bool {
        !matches!(self, ClinicalAlert::GrowthRestriction | ClinicalAlert::EpilepsyWithConvulsions)
    }
}

pub fn clinical_alerts(record: &ClinicalRecord, protocol: &Protocol) -> Vec<ClinicalAlert> {
    let mut alerts = Vec::new();
    let fetal = &record.fetal;

    if let Some(percentile) = fetal.weight_percentile {
        if percentile < protocol.fetal_weight_percentile_severe_below {
            alerts.push(ClinicalAlert::SevereGrowthRestriction);
        } else if percentile < protocol.fetal_weight_percentile_below {
            alerts.push(ClinicalAlert::GrowthRestriction);
        }
    }
    if fetal.umbilical_flow == Some(EndDiastolicFlow::Reversed) {
        alerts.push(ClinicalAlert::ReversedUmbilicalFlow);
    }
    if fetal.ductus_venosus == Some(DuctusVenosusWave::Reversed) {
        alerts.push(ClinicalAlert::ReversedDuctusVenosus);
    }
    if record.symptoms.convulsions && record.known_epilepsy {
        alerts.push(ClinicalAlert::EpilepsyWithConvulsions);
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{GestationalAge, LabPanel, MeanBloodPressure};

    fn record() -> ClinicalRecord {
        ClinicalRecord::new(
            GestationalAge::from_weeks_days(32, 0),
            MeanBloodPressure::new(145.0, 92.0),
        )
    }

    fn flag_of(entries: &[LabFlagEntry], analyte: Analyte) -> Option<LabFlag> {
        entries.iter().find(|e| e.analyte == analyte).map(|e| e.flag)
    }

    #[test]
    fn test_unmeasured_labs_have_no_flag() {
        assert!(lab_flags(&record(), &Protocol::default()).is_empty());
    }

    #[test]
    fn test_lab_grades() {
        let mut r = record();
        r.labs = LabPanel {
            platelets: Some(120.0),
            ast: Some(85.0),
            alt: Some(30.0),
            creatinine: Some(1.1),
            ldh: Some(450.0),
            ..LabPanel::default()
        };
        let flags = lab_flags(&r, &Protocol::default());

        assert_eq!(flag_of(&flags, Analyte::Platelets), Some(LabFlag::Alert));
        assert_eq!(flag_of(&flags, Analyte::Ast), Some(LabFlag::Critical));
        assert_eq!(flag_of(&flags, Analyte::Alt), Some(LabFlag::Normal));
        assert_eq!(flag_of(&flags, Analyte::Creatinine), Some(LabFlag::Critical));
        assert_eq!(flag_of(&flags, Analyte::Ldh), Some(LabFlag::Alert));
    }

    #[test]
    fn test_platelets_critical_at_boundary() {
        let mut r = record();
        r.labs.platelets = Some(100.0);
        let flags = lab_flags(&r, &Protocol::default());
        assert_eq!(flag_of(&flags, Analyte::Platelets), Some(LabFlag::Critical));
    }

    #[test]
    fn test_fetal_alerts() {
        let mut r = record();
        r.fetal.weight_percentile = Some(2.0);
        r.fetal.umbilical_flow = Some(EndDiastolicFlow::Reversed);
        r.fetal.ductus_venosus = Some(DuctusVenosusWave::Reversed);

        let alerts = clinical_alerts(&r, &Protocol::default());
        assert_eq!(
            alerts,
            vec![
                ClinicalAlert::SevereGrowthRestriction,
                ClinicalAlert::ReversedUmbilicalFlow,
                ClinicalAlert::ReversedDuctusVenosus,
            ]
        );
        assert!(alerts.iter().all(|a| a.is_critical()));
    }

    #[test]
    fn test_growth_restriction_moderate() {
        let mut r = record();
        r.fetal.weight_percentile = Some(7.0);
        assert_eq!(
            clinical_alerts(&r, &Protocol::default()),
            vec![ClinicalAlert::GrowthRestriction]
        );
    }

    #[test]
    fn test_epilepsy_annotation_requires_both() {
        let mut r = record();
        r.known_epilepsy = true;
        assert!(clinical_alerts(&r, &Protocol::default()).is_empty());

        r.symptoms.convulsions = true;
        assert_eq!(
            clinical_alerts(&r, &Protocol::default()),
            vec![ClinicalAlert::EpilepsyWithConvulsions]
        );
    }
}
