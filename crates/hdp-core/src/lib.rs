//! HDP Core - Hypertensive Disorders of Pregnancy Classification
//!
//! Pure Rust implementation of a clinical decision protocol for hypertensive
//! disorders of pregnancy. A single structured observation record is mapped to
//! a [`Verdict`]: diagnosis, severity level, delivery timing and surveillance
//! plan.
//!
//! # Features
//!
//! - Threshold predicates over blood pressure, labs, symptoms and fetal data
//! - Gestational-age dependent sFlt-1/PlGF interpretation
//! - HELLP composite (complete / partial)
//! - Priority-ordered diagnosis ladder (first match wins)
//! - Delivery timing with the post-ladder angiogenic ratio override
//! - Record builder with blood pressure averaging and range validation
//!
//! The classifier holds no state: the same record always yields the same
//! verdict, and it can be called from any number of threads at once.
//!
//! # Example
//!
//! ```rust
//! use hdp_core::{classify, Diagnosis, LabPanel, Level, RecordBuilder};
//!
//! let record = RecordBuilder::new()
//!     .gestational_age(30, 0)
//!     .blood_pressure(Some(150.0), Some(95.0))
//!     .labs(LabPanel {
//!         platelets: Some(80.0),
//!         ast: Some(200.0),
//!         ..LabPanel::default()
//!     })
//!     .build()
//!     .unwrap();
//!
//! let verdict = classify(&record);
//! assert_eq!(verdict.diagnosis, Diagnosis::PartialHellp);
//! assert_eq!(verdict.level, Level::Critical);
//! ```

pub mod alerts;
pub mod angiogenic;
pub mod builder;
pub mod classifier;
pub mod criteria;
pub mod delivery;
pub mod findings;
pub mod hellp;
pub mod ladder;
pub mod management;
pub mod protocol;
pub mod record;
pub mod verdict;

// Re-export commonly used types for convenience
pub use alerts::{Analyte, ClinicalAlert, LabFlag, LabFlagEntry};
pub use angiogenic::{RatioBand, RatioInterpretation};
pub use builder::{average_blood_pressure, BloodPressureMeasurement, RecordBuilder};
pub use classifier::{classify, Classifier};
pub use criteria::SeverityCriterion;
pub use delivery::{DeliveryPlan, Urgency};
pub use findings::Findings;
pub use hellp::{HellpAssessment, HellpComponent};
pub use ladder::{Diagnosis, Level};
pub use management::{SurveillanceIntensity, SurveillanceItem, SurveillancePlan, Therapy};
pub use protocol::Protocol;
pub use record::{
    ClinicalRecord, CtgCategory, DiabetesType, Dipstick, DuctusVenosusWave, EndDiastolicFlow,
    FetalAssessment, GestationalAge, LabPanel, MaternalProfile, MeanBloodPressure, Parity,
    PreviousPreeclampsia, Symptoms,
};
pub use verdict::Verdict;

/// Errors raised while assembling a record or loading a protocol.
///
/// The classifier itself never fails; these only come from the edges.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HdpError {
    /// No filled systolic or diastolic value among the measurements
    #[error("At least one complete blood pressure measurement is required")]
    MissingBloodPressure,
    /// Gestational age was never set
    #[error("Gestational age is required")]
    MissingGestationalAge,
    /// Weeks or days outside the accepted range
    #[error("Invalid gestational age: {weeks} weeks + {days} days")]
    InvalidGestationalAge { weeks: u8, days: u8 },
    /// A measured value outside its plausible range
    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Protocol thresholds that cannot be applied
    #[error("Invalid protocol: {0}")]
    InvalidProtocol(String),
    /// Protocol JSON could not be parsed
    #[error("Protocol parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for HdpError {
    fn from(err: serde_json::Error) -> Self {
        HdpError::Parse(err.to_string())
    }
}
