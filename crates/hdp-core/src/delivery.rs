//! Delivery timing
//!
//! Base recommendation from diagnosis, level and gestational age, then the
//! angiogenic ratio override applied over whatever the base produced.

use crate::ladder::{Diagnosis, Level};
use crate::protocol::Protocol;
use crate::record::GestationalAge;
use serde::{Deserialize, Serialize};

/// Delivery urgency tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Stabilize and deliver now
    Immediate,
    /// Deliver after stabilization / within 48h
    Urgent,
    /// Expectant management in a high-dependency setting
    Expectant,
    /// Discuss termination (pre-viable)
    Discuss,
    /// Planned delivery at term
    Planned,
    /// Surveillance, deliver later
    Monitor,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::Urgent => "urgent",
            Urgency::Expectant => "expectant",
            Urgency::Discuss => "discuss",
            Urgency::Planned => "planned",
            Urgency::Monitor => "monitor",
        }
    }
}

/// Recommendation text and urgency. Both empty when no rule applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryPlan {
    pub recommendation: String,
    pub urgency: Option<Urgency>,
    /// The sFlt-1/PlGF > 655 warning was appended
    pub ratio_override: bool,
}

impl DeliveryPlan {
    fn new(recommendation: impl Into<String>, urgency: Urgency) -> Self {
        DeliveryPlan {
            recommendation: recommendation.into(),
            urgency: Some(urgency),
            ratio_override: false,
        }
    }
}

pub const RATIO_OVERRIDE_WARNING: &str =
    "WARNING sFlt-1/PlGF >655: immediate corticosteroids; delivery likely within 48h";

/// Full delivery decision: base plan followed by the ratio override
pub fn plan_delivery(
    diagnosis: Diagnosis,
    level: Level,
    ga: GestationalAge,
    ratio: Option<f64>,
    protocol: &Protocol,
) -> DeliveryPlan {
    let plan = base_plan(diagnosis, level, ga, ratio, protocol);
    apply_ratio_override(plan, ratio, ga, protocol)
}

/// Recommendation from the ladder output alone
pub fn base_plan(
    diagnosis: Diagnosis,
    level: Level,
    ga: GestationalAge,
    ratio: Option<f64>,
    protocol: &Protocol,
) -> DeliveryPlan {
    let cut = &protocol.delivery;

    if matches!(diagnosis, Diagnosis::Eclampsia | Diagnosis::CompleteHellp) {
        return DeliveryPlan::new("Stabilization and immediate delivery", Urgency::Immediate);
    }

    match level {
        Level::Severe => {
            if ga.is_at_least(cut.late_preterm_weeks) {
                DeliveryPlan::new("Delivery after maternal stabilization", Urgency::Urgent)
            } else if ga.is_at_least(cut.viability_weeks) {
                DeliveryPlan::new(
                    format!(
                        "Expectant management possible in a high-dependency unit ({:.0} weeks): corticosteroids and magnesium sulfate",
                        ga.weeks()
                    ),
                    Urgency::Expectant,
                )
            } else {
                DeliveryPlan::new(
                    "Consider termination: very poor neonatal outcomes below 24 weeks",
                    Urgency::Discuss,
                )
            }
        }
        Level::Moderate => {
            if ga.is_at_least(cut.term_weeks) {
                DeliveryPlan::new("Delivery (37 weeks or later)", Urgency::Planned)
            } else if ga.is_at_least(cut.late_preterm_weeks)
                && ratio.map_or(false, |r| r > cut.late_preterm_ratio)
            {
                DeliveryPlan::new(
                    "Consider termination (sFlt-1/PlGF >201 between 34 and 36+6 weeks)",
                    Urgency::Urgent,
                )
            } else {
                DeliveryPlan::new(
                    "Close surveillance; reassess for delivery at 37 weeks",
                    Urgency::Monitor,
                )
            }
        }
        Level::Mild => {
            if ga.is_at_least(cut.term_weeks) {
                DeliveryPlan::new("Consider delivery (37 weeks or later)", Urgency::Planned)
            } else {
                DeliveryPlan::new(
                    "Surveillance 1-2 times per week; delivery at 37 weeks or later",
                    Urgency::Monitor,
                )
            }
        }
        // Partial HELLP (critical), normal and unknown carry no timing rule
        Level::Critical | Level::Normal | Level::Unknown => DeliveryPlan::default(),
    }
}

/// Post-ladder override: ratio > 655 before 34 weeks forces urgent delivery
/// planning unless delivery is already immediate.
pub fn apply_ratio_override(
    mut plan: DeliveryPlan,
    ratio: Option<f64>,
    ga: GestationalAge,
    protocol: &Protocol,
) -> DeliveryPlan {
    let cut = &protocol.delivery;
    let fires = ratio.map_or(false, |r| r > cut.override_ratio)
        && ga.is_before(cut.late_preterm_weeks)
        && plan.urgency != Some(Urgency::Immediate);

    if fires {
        log::warn!(
            "sFlt-1/PlGF override: ratio {:?} at {} forces urgent delivery",
            ratio,
            ga
        );
        plan.recommendation = if plan.recommendation.is_empty() {
            RATIO_OVERRIDE_WARNING.to_string()
        } else {
            format!("{} | {}", plan.recommendation, RATIO_OVERRIDE_WARNING)
        };
        plan.urgency = Some(Urgency::Urgent);
        plan.ratio_override = true;
    }

    plan
}
