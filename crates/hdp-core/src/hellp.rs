//! HELLP composite
//!
//! Hemolysis, Elevated Liver enzymes, Low Platelets. Independent of blood
//! pressure; the ladder decides whether a partial HELLP needs hypertension.

use crate::findings::Findings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HellpComponent {
    Hemolysis,
    ElevatedLiverEnzymes,
    LowPlatelets,
}

impl HellpComponent {
    pub fn description(&self) -> &'static str {
        match self {
            HellpComponent::Hemolysis => "Hemolysis",
            HellpComponent::ElevatedLiverEnzymes => "Elevated liver enzymes",
            HellpComponent::LowPlatelets => "Thrombocytopenia",
        }
    }
}

/// Components present and the resulting completeness flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HellpAssessment {
    pub components: Vec<HellpComponent>,
    /// All three components
    pub complete: bool,
    /// Exactly two components
    pub partial: bool,
}

impl HellpAssessment {
    pub fn evaluate(findings: &Findings) -> Self {
        let components: Vec<HellpComponent> = [
            (findings.hemolysis, HellpComponent::Hemolysis),
            (findings.liver_dysfunction, HellpComponent::ElevatedLiverEnzymes),
            (findings.thrombocytopenia, HellpComponent::LowPlatelets),
        ]
        .into_iter()
        .filter_map(|(present, component)| present.then_some(component))
        .collect();

        let complete = components.len() == 3;
        let partial = components.len() == 2;

        HellpAssessment {
            components,
            complete,
            partial,
        }
    }
}
