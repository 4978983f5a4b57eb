//! Record builder
//!
//! Assembles a [`ClinicalRecord`] from raw form values. Blood pressure is
//! entered as up to several readings which are averaged here, each side on its
//! own, so the classifier only ever sees one mean pair.

use crate::record::{
    ClinicalRecord, FetalAssessment, GestationalAge, LabPanel, MaternalProfile, MeanBloodPressure,
    Symptoms,
};
use crate::HdpError;
use serde::{Deserialize, Serialize};

/// Plausible systolic range in mmHg
pub const SYSTOLIC_RANGE: (f64, f64) = (60.0, 250.0);
/// Plausible diastolic range in mmHg
pub const DIASTOLIC_RANGE: (f64, f64) = (30.0, 160.0);
pub const MAX_GESTATIONAL_WEEKS: u8 = 42;
pub const MAX_EXTRA_DAYS: u8 = 6;

/// One blood pressure reading; either side may be left blank
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureMeasurement {
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
}

impl BloodPressureMeasurement {
    pub fn new(systolic: Option<f64>, diastolic: Option<f64>) -> Self {
        BloodPressureMeasurement { systolic, diastolic }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Both sides filled with a positive value
    pub fn is_complete(&self) -> bool {
        filled(self.systolic).is_some() && filled(self.diastolic).is_some()
    }
}

/// Blank and non-positive entries do not count as readings
fn filled(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Average the filled systolic and diastolic values separately
///
/// No rounding is applied. Fails when either side has no filled value at all.
pub fn average_blood_pressure(
    measurements: &[BloodPressureMeasurement],
) -> Result<MeanBloodPressure, HdpError> {
    let systolic = mean(measurements.iter().filter_map(|m| filled(m.systolic)));
    let diastolic = mean(measurements.iter().filter_map(|m| filled(m.diastolic)));

    match (systolic, diastolic) {
        (Some(systolic), Some(diastolic)) => Ok(MeanBloodPressure::new(systolic, diastolic)),
        _ => Err(HdpError::MissingBloodPressure),
    }
}

/// Number of readings with both sides filled
pub fn complete_measurements(measurements: &[BloodPressureMeasurement]) -> usize {
    measurements.iter().filter(|m| m.is_complete()).count()
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), HdpError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(HdpError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Builder for [`ClinicalRecord`]
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    gestational_age: Option<(u8, u8)>,
    measurements: Vec<BloodPressureMeasurement>,
    chronic_hypertension: bool,
    known_epilepsy: bool,
    labs: LabPanel,
    symptoms: Symptoms,
    fetal: FetalAssessment,
    profile: MaternalProfile,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed weeks plus extra days
    pub fn gestational_age(mut self, weeks: u8, days: u8) -> Self {
        self.gestational_age = Some((weeks, days));
        self
    }

    /// Add one reading
    pub fn blood_pressure(mut self, systolic: Option<f64>, diastolic: Option<f64>) -> Self {
        self.measurements
            .push(BloodPressureMeasurement::new(systolic, diastolic));
        self
    }

    pub fn measurement(mut self, measurement: BloodPressureMeasurement) -> Self {
        self.measurements.push(measurement);
        self
    }

    pub fn chronic_hypertension(mut self, value: bool) -> Self {
        self.chronic_hypertension = value;
        self
    }

    pub fn known_epilepsy(mut self, value: bool) -> Self {
        self.known_epilepsy = value;
        self
    }

    pub fn labs(mut self, labs: LabPanel) -> Self {
        self.labs = labs;
        self
    }

    pub fn symptoms(mut self, symptoms: Symptoms) -> Self {
        self.symptoms = symptoms;
        self
    }

    pub fn fetal(mut self, fetal: FetalAssessment) -> Self {
        self.fetal = fetal;
        self
    }

    pub fn profile(mut self, profile: MaternalProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Validate and assemble the record
    pub fn build(self) -> Result<ClinicalRecord, HdpError> {
        let (weeks, days) = self
            .gestational_age
            .ok_or(HdpError::MissingGestationalAge)?;
        if weeks > MAX_GESTATIONAL_WEEKS || days > MAX_EXTRA_DAYS {
            return Err(HdpError::InvalidGestationalAge { weeks, days });
        }

        // The first slot is mandatory; later ones only refine the mean
        if !self.measurements.first().map_or(false, |m| m.is_complete()) {
            return Err(HdpError::MissingBloodPressure);
        }

        for m in &self.measurements {
            if let Some(systolic) = filled(m.systolic) {
                check_range("systolic", systolic, SYSTOLIC_RANGE)?;
            }
            if let Some(diastolic) = filled(m.diastolic) {
                check_range("diastolic", diastolic, DIASTOLIC_RANGE)?;
            }
        }

        let blood_pressure = average_blood_pressure(&self.measurements)?;
        log::debug!(
            "built record: {}+{} weeks, mean BP {:.1}/{:.1} from {} complete readings",
            weeks,
            days,
            blood_pressure.systolic,
            blood_pressure.diastolic,
            complete_measurements(&self.measurements)
        );

        Ok(ClinicalRecord {
            gestational_age: GestationalAge::from_weeks_days(weeks, days),
            blood_pressure,
            chronic_hypertension: self.chronic_hypertension,
            known_epilepsy: self.known_epilepsy,
            labs: self.labs,
            symptoms: self.symptoms,
            fetal: self.fetal,
            profile: self.profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings() -> Vec<BloodPressureMeasurement> {
        vec![
            BloodPressureMeasurement::new(Some(150.0), Some(95.0)),
            BloodPressureMeasurement::empty(),
            BloodPressureMeasurement::new(Some(160.0), Some(100.0)),
        ]
    }

    #[test]
    fn test_average_skips_blank_readings() {
        let bp = average_blood_pressure(&readings()).unwrap();
        assert_eq!(bp.systolic, 155.0);
        assert_eq!(bp.diastolic, 97.5);
        assert_eq!(complete_measurements(&readings()), 2);
    }

    #[test]
    fn test_average_sides_independently() {
        let bp = average_blood_pressure(&[
            BloodPressureMeasurement::new(Some(141.0), None),
            BloodPressureMeasurement::new(Some(144.0), Some(91.0)),
        ])
        .unwrap();
        assert_eq!(bp.systolic, 142.5);
        assert_eq!(bp.diastolic, 91.0);
    }

    #[test]
    fn test_average_requires_both_sides() {
        assert_eq!(average_blood_pressure(&[]), Err(HdpError::MissingBloodPressure));
        assert_eq!(
            average_blood_pressure(&[BloodPressureMeasurement::new(Some(150.0), Some(0.0))]),
            Err(HdpError::MissingBloodPressure)
        );
    }

    #[test]
    fn test_build_minimal_record() {
        let record = RecordBuilder::new()
            .gestational_age(33, 6)
            .blood_pressure(Some(142.0), Some(88.0))
            .build()
            .unwrap();

        assert!(record.gestational_age.is_before(34.0));
        assert_eq!(record.blood_pressure, MeanBloodPressure::new(142.0, 88.0));
        assert!(!record.chronic_hypertension);
        assert_eq!(record.labs, LabPanel::default());
    }

    #[test]
    fn test_build_requires_gestational_age() {
        let err = RecordBuilder::new()
            .blood_pressure(Some(142.0), Some(88.0))
            .build()
            .unwrap_err();
        assert_eq!(err, HdpError::MissingGestationalAge);
    }

    #[test]
    fn test_build_requires_complete_first_reading() {
        let err = RecordBuilder::new()
            .gestational_age(30, 0)
            .measurement(BloodPressureMeasurement::empty())
            .blood_pressure(Some(150.0), None)
            .blood_pressure(None, Some(95.0))
            .build()
            .unwrap_err();
        assert_eq!(err, HdpError::MissingBloodPressure);

        let err = RecordBuilder::new()
            .gestational_age(30, 0)
            .blood_pressure(Some(150.0), None)
            .blood_pressure(Some(150.0), Some(95.0))
            .build()
            .unwrap_err();
        assert_eq!(err, HdpError::MissingBloodPressure);
    }

    #[test]
    fn test_build_allows_partial_later_readings() {
        let record = RecordBuilder::new()
            .gestational_age(30, 0)
            .blood_pressure(Some(150.0), Some(95.0))
            .blood_pressure(Some(160.0), None)
            .build()
            .unwrap();
        assert_eq!(record.blood_pressure, MeanBloodPressure::new(155.0, 95.0));
    }

    #[test]
    fn test_build_rejects_invalid_gestational_age() {
        let err = RecordBuilder::new()
            .gestational_age(43, 0)
            .blood_pressure(Some(142.0), Some(88.0))
            .build()
            .unwrap_err();
        assert_eq!(err, HdpError::InvalidGestationalAge { weeks: 43, days: 0 });

        let err = RecordBuilder::new()
            .gestational_age(30, 7)
            .blood_pressure(Some(142.0), Some(88.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, HdpError::InvalidGestationalAge { days: 7, .. }));
    }

    #[test]
    fn test_build_rejects_implausible_pressure() {
        let err = RecordBuilder::new()
            .gestational_age(30, 0)
            .blood_pressure(Some(300.0), Some(90.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, HdpError::OutOfRange { field: "systolic", .. }));

        let err = RecordBuilder::new()
            .gestational_age(30, 0)
            .blood_pressure(Some(140.0), Some(20.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, HdpError::OutOfRange { field: "diastolic", .. }));
    }

    #[test]
    fn test_build_carries_optional_sections() {
        let record = RecordBuilder::new()
            .gestational_age(28, 3)
            .measurement(BloodPressureMeasurement::new(Some(150.0), Some(95.0)))
            .chronic_hypertension(true)
            .known_epilepsy(true)
            .symptoms(Symptoms {
                severe_headache: true,
                ..Symptoms::default()
            })
            .build()
            .unwrap();

        assert!(record.chronic_hypertension);
        assert!(record.known_epilepsy);
        assert!(record.symptoms.severe_headache);
    }
}
