//! Clinical observation record
//!
//! The immutable input of one classification. Every field except gestational
//! age and mean blood pressure is optional; a missing value never counts as
//! zero, it simply leaves the matching finding unmet.

use serde::{Deserialize, Serialize};

// ============================================================================
// Core measurements
// ============================================================================

/// Gestational age as fractional weeks (`weeks + days / 7`)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestationalAge(f64);

impl GestationalAge {
    /// Build from completed weeks and extra days
    pub fn from_weeks_days(weeks: u8, days: u8) -> Self {
        GestationalAge(f64::from(weeks) + f64::from(days) / 7.0)
    }

    /// Build from an already fractional week count
    pub fn from_weeks(weeks: f64) -> Self {
        GestationalAge(weeks)
    }

    /// Fractional weeks
    pub fn weeks(&self) -> f64 {
        self.0
    }

    /// True when strictly before the given week cutoff
    pub fn is_before(&self, cutoff_weeks: f64) -> bool {
        self.0 < cutoff_weeks
    }

    /// True when at or beyond the given week cutoff
    pub fn is_at_least(&self, cutoff_weeks: f64) -> bool {
        self.0 >= cutoff_weeks
    }
}

impl std::fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} weeks", self.0)
    }
}

/// Mean of the filled blood pressure measurements, in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanBloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

impl MeanBloodPressure {
    pub fn new(systolic: f64, diastolic: f64) -> Self {
        MeanBloodPressure { systolic, diastolic }
    }

    /// Mean arterial pressure: (2 × diastolic + systolic) / 3
    pub fn mean_arterial_pressure(&self) -> f64 {
        (2.0 * self.diastolic + self.systolic) / 3.0
    }
}

// ============================================================================
// Laboratory panel
// ============================================================================

/// Urine dipstick protein category (ordinal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dipstick {
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "1+")]
    Plus1,
    #[serde(rename = "2+")]
    Plus2,
    #[serde(rename = "3+")]
    Plus3,
    #[serde(rename = "4+")]
    Plus4,
}

impl Dipstick {
    pub fn label(&self) -> &'static str {
        match self {
            Dipstick::Negative => "negative",
            Dipstick::Trace => "trace",
            Dipstick::Plus1 => "1+",
            Dipstick::Plus2 => "2+",
            Dipstick::Plus3 => "3+",
            Dipstick::Plus4 => "4+",
        }
    }
}

/// Laboratory results. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabPanel {
    /// Platelets (×10³/µL)
    pub platelets: Option<f64>,
    /// AST (U/L)
    pub ast: Option<f64>,
    /// ALT (U/L)
    pub alt: Option<f64>,
    /// Creatinine (mg/dL)
    pub creatinine: Option<f64>,
    /// LDH (U/L)
    pub ldh: Option<f64>,
    /// Haptoglobin (mg/dL)
    pub haptoglobin: Option<f64>,
    /// Uric acid (mg/dL)
    pub uric_acid: Option<f64>,
    /// Total bilirubin (mg/dL)
    pub total_bilirubin: Option<f64>,
    /// Urine protein/creatinine ratio
    pub protein_creatinine_ratio: Option<f64>,
    /// 24h proteinuria (mg)
    pub proteinuria_24h: Option<f64>,
    /// Urine dipstick
    pub dipstick: Option<Dipstick>,
    /// Upper limit of normal for AST/ALT; protocol default when unset
    pub transaminase_uln: Option<f64>,
    /// sFlt-1 (pg/mL)
    pub sflt1: Option<f64>,
    /// PlGF (pg/mL)
    pub plgf: Option<f64>,
    /// Manually entered sFlt-1/PlGF ratio; wins over the computed one
    pub sflt1_plgf_ratio: Option<f64>,
}

// ============================================================================
// Symptoms
// ============================================================================

/// Independent symptom flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symptoms {
    /// Severe or persistent headache, refractory to analgesia
    pub severe_headache: bool,
    /// Scotomata, photophobia, blurred vision
    pub visual_disturbance: bool,
    pub altered_consciousness: bool,
    /// Epigastric or right upper quadrant pain
    pub epigastric_pain: bool,
    pub pulmonary_edema: bool,
    /// New-onset convulsions
    pub convulsions: bool,
}

impl Symptoms {
    /// Any flag set, convulsions included
    pub fn any(&self) -> bool {
        self.severe_headache
            || self.visual_disturbance
            || self.altered_consciousness
            || self.epigastric_pain
            || self.pulmonary_edema
            || self.convulsions
    }
}

// ============================================================================
// Fetal assessment
// ============================================================================

/// Umbilical artery end-diastolic flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndDiastolicFlow {
    Normal,
    Absent,
    Reversed,
}

/// Ductus venosus a-wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuctusVenosusWave {
    Normal,
    Absent,
    Reversed,
}

/// Cardiotocography category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtgCategory {
    Reassuring,
    Atypical,
    Pathological,
}

/// Fetal biometry and Doppler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetalAssessment {
    /// Estimated fetal weight (g)
    pub estimated_weight_g: Option<f64>,
    /// Estimated fetal weight percentile
    pub weight_percentile: Option<f64>,
    /// Amniotic fluid index (cm)
    pub amniotic_fluid_index: Option<f64>,
    pub umbilical_flow: Option<EndDiastolicFlow>,
    pub ductus_venosus: Option<DuctusVenosusWave>,
    /// Umbilical artery pulsatility index
    pub umbilical_pi: Option<f64>,
    /// Middle cerebral artery pulsatility index
    pub middle_cerebral_pi: Option<f64>,
    pub ctg: Option<CtgCategory>,
}

// ============================================================================
// Maternal profile (carried for display, not read by the classifier)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Nulliparous,
    Multiparous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiabetesType {
    Type1,
    Type2,
    Gestational,
}

/// Onset of preeclampsia in a previous pregnancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviousPreeclampsia {
    /// Before 34 weeks
    Early,
    Late,
    Unspecified,
}

/// Demographics, history and prophylaxis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaternalProfile {
    pub age_years: Option<u8>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub parity: Option<Parity>,
    pub multiple_gestation: bool,
    pub diabetes: Option<DiabetesType>,
    pub chronic_kidney_disease: bool,
    pub autoimmune_disease: bool,
    pub previous_preeclampsia: Option<PreviousPreeclampsia>,
    pub assisted_reproduction: bool,
    pub aspirin: bool,
    pub thromboprophylaxis: bool,
}

impl MaternalProfile {
    /// Body mass index (kg/m²) when weight and height are both known
    pub fn bmi(&self) -> Option<f64> {
        match (self.weight_kg, self.height_cm) {
            (Some(weight), Some(height)) if weight > 0.0 && height > 0.0 => {
                let meters = height / 100.0;
                Some(weight / (meters * meters))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// One complete (possibly partial) clinical record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub gestational_age: GestationalAge,
    pub blood_pressure: MeanBloodPressure,
    /// Pre-existing hypertension, independent of the current readings
    #[serde(default)]
    pub chronic_hypertension: bool,
    /// Only annotates a convulsion-driven diagnosis
    #[serde(default)]
    pub known_epilepsy: bool,
    #[serde(default)]
    pub labs: LabPanel,
    #[serde(default)]
    pub symptoms: Symptoms,
    #[serde(default)]
    pub fetal: FetalAssessment,
    #[serde(default)]
    pub profile: MaternalProfile,
}

impl ClinicalRecord {
    /// Minimal record: gestational age and mean blood pressure, nothing else
    pub fn new(gestational_age: GestationalAge, blood_pressure: MeanBloodPressure) -> Self {
        ClinicalRecord {
            gestational_age,
            blood_pressure,
            chronic_hypertension: false,
            known_epilepsy: false,
            labs: LabPanel::default(),
            symptoms: Symptoms::default(),
            fetal: FetalAssessment::default(),
            profile: MaternalProfile::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gestational_age_fraction() {
        let ga = GestationalAge::from_weeks_days(33, 6);
        assert!((ga.weeks() - (33.0 + 6.0 / 7.0)).abs() < 1e-12);
        assert!(ga.is_before(34.0));
        assert!(!ga.is_at_least(34.0));
        assert!(GestationalAge::from_weeks_days(34, 0).is_at_least(34.0));
    }

    #[test]
    fn test_dipstick_ordering() {
        assert!(Dipstick::Negative < Dipstick::Trace);
        assert!(Dipstick::Trace < Dipstick::Plus1);
        assert!(Dipstick::Plus1 < Dipstick::Plus2);
        assert!(Dipstick::Plus4 > Dipstick::Plus3);
    }

    #[test]
    fn test_dipstick_serde_labels() {
        let json = serde_json::to_string(&Dipstick::Plus2).unwrap();
        assert_eq!(json, "\"2+\"");
        let parsed: Dipstick = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(parsed, Dipstick::Trace);
    }

    #[test]
    fn test_mean_arterial_pressure() {
        let bp = MeanBloodPressure::new(150.0, 90.0);
        assert!((bp.mean_arterial_pressure() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmi() {
        let profile = MaternalProfile {
            weight_kg: Some(81.0),
            height_cm: Some(180.0),
            ..MaternalProfile::default()
        };
        assert!((profile.bmi().unwrap() - 25.0).abs() < 1e-9);
        assert_eq!(MaternalProfile::default().bmi(), None);
    }

    #[test]
    fn test_record_deserializes_with_defaults() {
        let json = r#"{
            "gestational_age": 30.0,
            "blood_pressure": { "systolic": 150.0, "diastolic": 95.0 }
        }"#;
        let record: ClinicalRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.gestational_age.weeks(), 30.0);
        assert_eq!(record.labs, LabPanel::default());
        assert!(!record.symptoms.any());
    }
}
