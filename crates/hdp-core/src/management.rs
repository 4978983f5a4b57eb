//! Surveillance plan and suggested therapy

use crate::findings::Findings;
use crate::ladder::Level;
use crate::protocol::Protocol;
use crate::record::GestationalAge;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveillanceIntensity {
    Standard,
    Intensive,
}

/// One surveillance checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveillanceItem {
    BloodPressureEvery6Hours,
    BloodPressureOnceOrTwiceDaily,
    DailyLabs,
    LabsTwiceWeekly,
    CtgEvery8Hours,
    DailyCtg,
    WeeklyAngiogenicRatio,
    UltrasoundEvery2Weeks,
    UltrasoundEvery15Days,
    WeeklyBiophysicalProfile,
    FluidBalance,
    MagnesiumEvery6Hours,
}

impl SurveillanceItem {
    pub fn description(&self) -> &'static str {
        match self {
            SurveillanceItem::BloodPressureEvery6Hours => "Blood pressure every 6h (minimum)",
            SurveillanceItem::BloodPressureOnceOrTwiceDaily => "Blood pressure 1-2 times/day",
            SurveillanceItem::DailyLabs => "Labs daily (minimum)",
            SurveillanceItem::LabsTwiceWeekly => "Labs twice a week",
            SurveillanceItem::CtgEvery8Hours => "CTG every 8h",
            SurveillanceItem::DailyCtg => "CTG daily",
            SurveillanceItem::WeeklyAngiogenicRatio => "sFlt-1/PlGF weekly",
            SurveillanceItem::UltrasoundEvery2Weeks => "Ultrasound every 2 weeks",
            SurveillanceItem::UltrasoundEvery15Days => "Ultrasound every 15 days",
            SurveillanceItem::WeeklyBiophysicalProfile => "Biophysical profile weekly",
            SurveillanceItem::FluidBalance => "Fluid balance",
            SurveillanceItem::MagnesiumEvery6Hours => "Serum magnesium every 6h (if on MgSO4)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveillancePlan {
    pub intensity: SurveillanceIntensity,
    pub items: Vec<SurveillanceItem>,
}

/// Intensive checklist for severe/critical levels, standard otherwise
pub fn surveillance_plan(level: Level) -> SurveillancePlan {
    use SurveillanceItem::*;

    if level.is_severe_or_worse() {
        SurveillancePlan {
            intensity: SurveillanceIntensity::Intensive,
            items: vec![
                BloodPressureEvery6Hours,
                DailyLabs,
                CtgEvery8Hours,
                WeeklyAngiogenicRatio,
                UltrasoundEvery2Weeks,
                WeeklyBiophysicalProfile,
                FluidBalance,
                MagnesiumEvery6Hours,
            ],
        }
    } else {
        SurveillancePlan {
            intensity: SurveillanceIntensity::Standard,
            items: vec![
                BloodPressureOnceOrTwiceDaily,
                LabsTwiceWeekly,
                DailyCtg,
                WeeklyAngiogenicRatio,
                UltrasoundEvery15Days,
                WeeklyBiophysicalProfile,
            ],
        }
    }
}

/// Suggested treatment line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Therapy {
    AcuteAntihypertensive,
    MagnesiumSulfate,
    AntenatalCorticosteroids,
    MaintenanceAntihypertensive,
}

impl Therapy {
    pub fn description(&self) -> &'static str {
        match self {
            Therapy::AcuteAntihypertensive => {
                "Hypertensive emergency: nifedipine 10 mg PO (repeat every 20 min) or labetalol 20 mg IV (escalate every 10 min)"
            }
            Therapy::MagnesiumSulfate => {
                "MgSO4: 4 g IV loading over 20 min, then 2 g/h; continue 24h postpartum"
            }
            Therapy::AntenatalCorticosteroids => {
                "Corticosteroids for fetal lung maturation: betamethasone 12 mg IM, 2 doses 24h apart"
            }
            Therapy::MaintenanceAntihypertensive => {
                "Maintenance: nifedipine XR 30-60 mg/day PO or labetalol 100-400 mg 2-3 times/day PO"
            }
        }
    }
}

/// Therapy lines, only for severe or critical levels
pub fn suggested_therapy(
    level: Level,
    findings: &Findings,
    ga: GestationalAge,
    protocol: &Protocol,
) -> Vec<Therapy> {
    if !level.is_severe_or_worse() {
        return Vec::new();
    }

    let mut therapy = Vec::with_capacity(4);
    if findings.severe_hypertension {
        therapy.push(Therapy::AcuteAntihypertensive);
    }
    therapy.push(Therapy::MagnesiumSulfate);
    if ga.is_before(protocol.delivery.late_preterm_weeks) {
        therapy.push(Therapy::AntenatalCorticosteroids);
    }
    therapy.push(Therapy::MaintenanceAntihypertensive);
    therapy
}
