//! Classifier
//!
//! Pure, synchronous mapping from a [`ClinicalRecord`] to a [`Verdict`]:
//! derive findings, build the criteria list and HELLP composite, walk the
//! ladder, then decide delivery timing (ratio override last). No state is kept
//! between calls, so a single classifier can be shared across threads.

use crate::alerts;
use crate::angiogenic;
use crate::criteria;
use crate::delivery;
use crate::findings::Findings;
use crate::hellp::HellpAssessment;
use crate::ladder::{self, LadderInput};
use crate::management;
use crate::protocol::Protocol;
use crate::record::ClinicalRecord;
use crate::verdict::Verdict;

/// Classification engine bound to one protocol
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classifier {
    protocol: Protocol,
}

impl Classifier {
    /// Create a classifier for the given protocol
    pub fn new(protocol: Protocol) -> Self {
        Classifier { protocol }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Classify one record. Never fails; missing data only leaves findings unmet.
    pub fn classify(&self, record: &ClinicalRecord) -> Verdict {
        let protocol = &self.protocol;
        let ga = record.gestational_age;

        let findings = Findings::derive(record, protocol);
        log::trace!("derived findings: {:?}", findings);

        let severity_criteria = criteria::severity_criteria(&findings, &record.symptoms);
        let hellp = HellpAssessment::evaluate(&findings);

        let outcome = ladder::evaluate(&LadderInput {
            findings: &findings,
            hellp: &hellp,
            chronic_hypertension: record.chronic_hypertension,
            has_severity_criteria: !severity_criteria.is_empty(),
        });

        let delivery = delivery::plan_delivery(outcome.diagnosis, outcome.level, ga, findings.ratio, protocol);
        let therapy = management::suggested_therapy(outcome.level, &findings, ga, protocol);

        log::debug!(
            "classified {} at {}: {} / {:?}",
            outcome.diagnosis,
            ga,
            outcome.level,
            delivery.urgency
        );

        Verdict {
            diagnosis: outcome.diagnosis,
            diagnosis_label: outcome.diagnosis.label().to_string(),
            level: outcome.level,
            severity_criteria,
            hellp,
            delivery,
            gestational_age: ga,
            proteinuria: findings.proteinuria,
            mean_arterial_pressure: record.blood_pressure.mean_arterial_pressure(),
            ratio: findings.ratio,
            ratio_interpretation: angiogenic::interpret(findings.ratio, ga, protocol),
            lab_flags: alerts::lab_flags(record, protocol),
            alerts: alerts::clinical_alerts(record, protocol),
            surveillance: management::surveillance_plan(outcome.level),
            therapy,
            findings,
        }
    }
}

/// Classify with the default protocol
pub fn classify(record: &ClinicalRecord) -> Verdict {
    Classifier::default().classify(record)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::ladder::{Diagnosis, Level};
    use crate::record::{Dipstick, GestationalAge, LabPanel, MeanBloodPressure, Symptoms};
    use proptest::prelude::*;

    fn opt(range: std::ops::Range<f64>) -> impl Strategy<Value = Option<f64>> {
        proptest::option::of(range)
    }

    fn dipstick() -> impl Strategy<Value = Option<Dipstick>> {
        proptest::option::of(prop_oneof![
            Just(Dipstick::Negative),
            Just(Dipstick::Trace),
            Just(Dipstick::Plus1),
            Just(Dipstick::Plus2),
            Just(Dipstick::Plus3),
            Just(Dipstick::Plus4),
        ])
    }

    prop_compose! {
        fn labs()(
            platelets in opt(10.0..400.0),
            ast in opt(5.0..1000.0),
            alt in opt(5.0..1000.0),
            creatinine in opt(0.2..4.0),
            ldh in opt(100.0..3000.0),
            haptoglobin in opt(0.0..200.0),
            pc in opt(0.0..5.0),
            day in opt(0.0..5000.0),
            dip in dipstick(),
            ratio in opt(1.0..1500.0),
        ) -> LabPanel {
            LabPanel {
                platelets,
                ast,
                alt,
                creatinine,
                ldh,
                haptoglobin,
                protein_creatinine_ratio: pc,
                proteinuria_24h: day,
                dipstick: dip,
                sflt1_plgf_ratio: ratio,
                ..LabPanel::default()
            }
        }
    }

    prop_compose! {
        fn symptoms()(flags in proptest::array::uniform6(any::<bool>())) -> Symptoms {
            Symptoms {
                severe_headache: flags[0],
                visual_disturbance: flags[1],
                altered_consciousness: flags[2],
                epigastric_pain: flags[3],
                pulmonary_edema: flags[4],
                convulsions: flags[5],
            }
        }
    }

    prop_compose! {
        fn records()(
            weeks in 0.0..43.0f64,
            sys in 60.0..250.0f64,
            dia in 30.0..160.0f64,
            chronic in any::<bool>(),
            labs in labs(),
            symptoms in symptoms(),
        ) -> ClinicalRecord {
            let mut record = ClinicalRecord::new(
                GestationalAge::from_weeks(weeks),
                MeanBloodPressure::new(sys, dia),
            );
            record.chronic_hypertension = chronic;
            record.labs = labs;
            record.symptoms = symptoms;
            record
        }
    }

    proptest! {
        /// Convulsions always mean eclampsia
        #[test]
        fn convulsions_dominate(mut record in records()) {
            record.symptoms.convulsions = true;
            let verdict = classify(&record);
            prop_assert_eq!(verdict.diagnosis, Diagnosis::Eclampsia);
            prop_assert_eq!(verdict.level, Level::Critical);
        }

        /// Same record, same verdict
        #[test]
        fn classification_is_idempotent(record in records()) {
            let first = classify(&record);
            let second = classify(&record);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }

        /// The incomplete-assessment fallback is never reached
        #[test]
        fn fallback_never_reached(record in records()) {
            prop_assert_ne!(classify(&record).diagnosis, Diagnosis::IncompleteAssessment);
        }

        /// Without hypertension only eclampsia, complete HELLP or no-hypertension are possible
        #[test]
        fn normotensive_outcomes(mut record in records()) {
            record.blood_pressure = MeanBloodPressure::new(120.0, 70.0);
            let diagnosis = classify(&record).diagnosis;
            prop_assert!(matches!(
                diagnosis,
                Diagnosis::Eclampsia | Diagnosis::CompleteHellp | Diagnosis::NoHypertension
            ));
        }

        /// Any numbers at all, NaN and infinities included, still produce a verdict
        #[test]
        fn arbitrary_numbers_never_panic(
            weeks in any::<f64>(),
            sys in any::<f64>(),
            dia in any::<f64>(),
            platelets in proptest::option::of(any::<f64>()),
            ratio in proptest::option::of(any::<f64>()),
            plgf in proptest::option::of(any::<f64>()),
        ) {
            let mut record = ClinicalRecord::new(
                GestationalAge::from_weeks(weeks),
                MeanBloodPressure::new(sys, dia),
            );
            record.labs.platelets = platelets;
            record.labs.sflt1_plgf_ratio = ratio;
            record.labs.sflt1 = Some(1000.0);
            record.labs.plgf = plgf;
            let _ = classify(&record);
        }
    }
}
