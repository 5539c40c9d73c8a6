//! Action selector — one recommended action per unit.
//!
//! DECISION ORDER (fixed, never reordered):
//!   1. achievement ≥ maintain band     → Maintain            (low)
//!   2. achievement < urgent band       → PursueBoth          (urgent)
//!   3. mid band, by lever feasibility:
//!        both levers actionable and the advisory plan needs no more
//!        admission increase than stay increase → PrioritizeAdmissions
//!        admission actionable          → PrioritizeAdmissions (medium)
//!        stay actionable               → AdjustLengthOfStay   (medium)
//!        neither                       → ContinueMonitoring   (low)
//!
//! Extremes short-circuit before feasibility is consulted: a unit on
//! target is never pushed, and a unit far below target never gets an
//! optional lever.

use crate::{
    config::EngineConfig,
    feasibility::{score_feasibility, FeasibilityEvaluation},
    input::{BasicInfo, FeasibilityRecord, SimulationRecord},
    types::{FeasibilityScore, Percent},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    Medium,
    Low,
}

impl Priority {
    pub fn badge(self) -> PriorityBadge {
        match self {
            Self::Urgent => PriorityBadge { label: "Urgent", color: "#e08283", emoji: "🚨" },
            Self::Medium => PriorityBadge { label: "Medium", color: "#f5d76e", emoji: "⚠️" },
            Self::Low    => PriorityBadge { label: "Low",    color: "#7fb069", emoji: "✅" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityBadge {
    pub label: &'static str,
    pub color: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MaintainCurrentState,
    PursueBothLevers,
    PrioritizeAdmissions,
    AdjustLengthOfStay,
    ContinueMonitoring,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::MaintainCurrentState => "Maintain current state",
            Self::PursueBothLevers     => "Pursue both levers",
            Self::PrioritizeAdmissions => "Prioritize admissions",
            Self::AdjustLengthOfStay   => "Adjust length of stay",
            Self::ContinueMonitoring   => "Continue monitoring",
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            Self::PursueBothLevers => Priority::Urgent,
            Self::PrioritizeAdmissions | Self::AdjustLengthOfStay => Priority::Medium,
            Self::MaintainCurrentState | Self::ContinueMonitoring => Priority::Low,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::MaintainCurrentState => "#7fb069",
            Self::PursueBothLevers     => "#e08283",
            Self::PrioritizeAdmissions | Self::AdjustLengthOfStay => "#f5d76e",
            Self::ContinueMonitoring   => "#b3b9b3",
        }
    }
}

/// Which row of the decision table fired. Determines action and rationale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    NearTarget,
    LargeShortfall,
    PlanFavorsAdmissions,
    BedCapacityAvailable,
    StayAdjustable,
    NoActionableLever,
}

impl DecisionBasis {
    pub fn action(self) -> Action {
        match self {
            Self::NearTarget           => Action::MaintainCurrentState,
            Self::LargeShortfall       => Action::PursueBothLevers,
            Self::PlanFavorsAdmissions => Action::PrioritizeAdmissions,
            Self::BedCapacityAvailable => Action::PrioritizeAdmissions,
            Self::StayAdjustable       => Action::AdjustLengthOfStay,
            Self::NoActionableLever    => Action::ContinueMonitoring,
        }
    }

    pub fn rationale(self) -> &'static str {
        match self {
            Self::NearTarget => "Target is nearly achieved; keep the current course",
            Self::LargeShortfall => {
                "Shortfall is large; work on both admission growth and length-of-stay optimization"
            }
            Self::PlanFavorsAdmissions => {
                "Beds are available and raising admissions is the more achievable change"
            }
            Self::BedCapacityAvailable => "Beds are available, so raising admissions is effective",
            Self::StayAdjustable => "Length of stay has room for adjustment",
            Self::NoActionableLever => {
                "Major changes are hard to make right now; keep watching the trend"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecommendation {
    pub action: Action,
    pub label: &'static str,
    pub basis: DecisionBasis,
    pub reasoning: &'static str,
    pub priority: Priority,
    pub color: &'static str,
}

impl From<DecisionBasis> for ActionRecommendation {
    fn from(basis: DecisionBasis) -> Self {
        let action = basis.action();
        Self {
            action,
            label: action.label(),
            basis,
            reasoning: basis.rationale(),
            priority: action.priority(),
            color: action.color(),
        }
    }
}

/// The decision table as a pure function of its inputs.
pub fn select_action(
    achievement_pct: Percent,
    admission_score: FeasibilityScore,
    los_score: FeasibilityScore,
    simulation: Option<&SimulationRecord>,
    config: &EngineConfig,
) -> ActionRecommendation {
    let thresholds = &config.action;

    let basis = if achievement_pct >= thresholds.maintain_pct {
        DecisionBasis::NearTarget
    } else if achievement_pct < thresholds.urgent_below_pct {
        DecisionBasis::LargeShortfall
    } else {
        let admission_ok = admission_score >= thresholds.actionable_score;
        let los_ok = los_score >= thresholds.actionable_score;
        // Equal planned increases favour admissions.
        let plan_favors_admissions = simulation
            .is_some_and(|sim| sim.admission_increase() <= sim.los_increase());

        if admission_ok && los_ok && plan_favors_admissions {
            DecisionBasis::PlanFavorsAdmissions
        } else if admission_ok {
            DecisionBasis::BedCapacityAvailable
        } else if los_ok {
            DecisionBasis::StayAdjustable
        } else {
            DecisionBasis::NoActionableLever
        }
    };

    ActionRecommendation::from(basis)
}

/// Score both levers, then run the decision table.
pub fn score_and_select(
    info: &BasicInfo,
    feasibility: Option<&FeasibilityRecord>,
    simulation: Option<&SimulationRecord>,
    config: &EngineConfig,
) -> (FeasibilityEvaluation, ActionRecommendation) {
    let evaluation = score_feasibility(feasibility, &config.feasibility);
    let recommendation = select_action(
        info.census_achievement,
        evaluation.admission_feasibility.score,
        evaluation.los_feasibility.score,
        simulation,
        config,
    );
    (evaluation, recommendation)
}
