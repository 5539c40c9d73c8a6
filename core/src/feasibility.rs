//! Feasibility scorer: how ready each lever is to be pulled.
//!
//! A lever's score is the number of its criteria that currently hold.
//! A missing feasibility record scores 0 for both levers.

use crate::{
    config::FeasibilityThresholds,
    input::{criteria_score, Criteria, FeasibilityRecord},
    types::FeasibilityScore,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityTier {
    High,
    Medium,
    Low,
}

impl FeasibilityTier {
    pub fn from_score(score: FeasibilityScore, thresholds: &FeasibilityThresholds) -> Self {
        if score >= thresholds.high_score {
            Self::High
        } else if score >= thresholds.medium_score {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High   => "high",
            Self::Medium => "medium",
            Self::Low    => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverFeasibility {
    pub score: FeasibilityScore,
    pub details: Criteria,
    pub assessment: FeasibilityTier,
}

impl LeverFeasibility {
    fn evaluate(criteria: Option<&Criteria>, thresholds: &FeasibilityThresholds) -> Self {
        let details = criteria.cloned().unwrap_or_default();
        let score = criteria_score(&details);
        Self {
            score,
            assessment: FeasibilityTier::from_score(score, thresholds),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityEvaluation {
    pub admission_feasibility: LeverFeasibility,
    pub los_feasibility: LeverFeasibility,
}

pub fn score_feasibility(
    feasibility: Option<&FeasibilityRecord>,
    thresholds: &FeasibilityThresholds,
) -> FeasibilityEvaluation {
    FeasibilityEvaluation {
        admission_feasibility: LeverFeasibility::evaluate(feasibility.map(|f| &f.admission), thresholds),
        los_feasibility: LeverFeasibility::evaluate(feasibility.map(|f| &f.los), thresholds),
    }
}

/// Render criteria as `✅ name / ❌ name`.
pub fn format_feasibility_details(details: &Criteria) -> String {
    if details.is_empty() {
        return "No evaluation data".into();
    }
    details
        .iter()
        .map(|(name, &met)| format!("{} {name}", if met { "✅" } else { "❌" }))
        .collect::<Vec<_>>()
        .join(" / ")
}
