//! Report assembler — merges every stage's output into one record.
//!
//! The assembler computes one last figure, the expected effect, and
//! renders the plain-text summary. It has no failure path.

use crate::{
    action_selector::ActionRecommendation,
    capacity_simulator::SimulationReport,
    config::EngineConfig,
    current_analysis::CurrentAnalysis,
    effort::EffortEvaluation,
    error::EngineResult,
    feasibility::FeasibilityEvaluation,
    input::{BasicInfo, HospitalTargets},
    types::{Census, Percent},
};
use chrono::NaiveDateTime;
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectStatus {
    Achieved,
    Potential,
    Maintained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Positive,
    Significant,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedEffect {
    pub status: EffectStatus,
    pub description: String,
    pub impact: Impact,
    /// Share of the hospital-wide gap this unit would close (potential only).
    pub contribution_percentage: Option<Percent>,
}

/// What closing this unit's gap would mean for the hospital.
///
/// - `census_gap ≥ 0`                  → achieved
/// - hospital gap (target − current) > 0 → potential, |gap| ÷ hospital gap × 100
/// - otherwise                         → maintained
///
/// Hospital-wide current occupancy falls back to the unit's own occupancy
/// when the targets record does not carry it.
pub fn expected_effect(
    census_gap: Census,
    unit_census: Census,
    targets: &HospitalTargets,
    config: &EngineConfig,
) -> ExpectedEffect {
    if census_gap >= 0.0 {
        return ExpectedEffect {
            status: EffectStatus::Achieved,
            description: "Target already achieved".into(),
            impact: Impact::Positive,
            contribution_percentage: None,
        };
    }

    let hospital_target = targets.daily_census.unwrap_or(config.default_hospital_target);
    let hospital_current = targets.current_census.unwrap_or(unit_census);
    let hospital_gap = hospital_target - hospital_current;

    if hospital_gap > 0.0 {
        let contribution = census_gap.abs() / hospital_gap * 100.0;
        ExpectedEffect {
            status: EffectStatus::Potential,
            description: format!(
                "Reaching target would close {contribution:.1}% of the hospital-wide gap"
            ),
            impact: Impact::Significant,
            contribution_percentage: Some(contribution),
        }
    } else {
        ExpectedEffect {
            status: EffectStatus::Maintained,
            description: "Holding the current level keeps a steady contribution".into(),
            impact: Impact::Stable,
            contribution_percentage: None,
        }
    }
}

/// Outputs of stages 2–4, handed to the assembler together.
#[derive(Debug, Clone)]
pub struct StageOutputs {
    pub effort: EffortEvaluation,
    pub current_analysis: CurrentAnalysis,
    pub feasibility: FeasibilityEvaluation,
    pub simulation: SimulationReport,
    pub action: ActionRecommendation,
}

/// The engine's result for one unit in one cycle. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReport {
    pub basic_info: BasicInfo,
    pub effort_status: EffortEvaluation,
    pub current_analysis: CurrentAnalysis,
    pub feasibility_evaluation: FeasibilityEvaluation,
    pub effect_simulation: SimulationReport,
    pub basic_action: ActionRecommendation,
    pub expected_effect: ExpectedEffect,
    #[serde(serialize_with = "serialize_timestamp")]
    pub generated_at: NaiveDateTime,
}

fn serialize_timestamp<S: serde::Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

pub fn assemble(
    basic_info: BasicInfo,
    stages: StageOutputs,
    targets: &HospitalTargets,
    config: &EngineConfig,
    generated_at: NaiveDateTime,
) -> ActionReport {
    let expected_effect = expected_effect(
        stages.current_analysis.census_gap,
        basic_info.current_census,
        targets,
        config,
    );

    ActionReport {
        basic_info,
        effort_status: stages.effort,
        current_analysis: stages.current_analysis,
        feasibility_evaluation: stages.feasibility,
        effect_simulation: stages.simulation,
        basic_action: stages.action,
        expected_effect,
        generated_at,
    }
}

impl ActionReport {
    /// Short multi-line summary for display next to the unit.
    pub fn summary_text(&self) -> String {
        let info = &self.basic_info;
        let target = if info.census_target > 0.0 {
            format!("{:.1}", info.census_target)
        } else {
            "--".to_string()
        };

        format!(
            "【{name}】{emoji} {status}\n\
             \n\
             Current: {current:.1} patients (target: {target})\n\
             Achievement: {achievement:.1}% {mark}\n\
             \n\
             Recommended action: {action}\n\
             Reason: {reason}",
            name = info.dept_name,
            emoji = self.effort_status.emoji,
            status = self.effort_status.label,
            current = info.current_census,
            achievement = info.census_achievement,
            mark = self.current_analysis.census_status,
            action = self.basic_action.label,
            reason = self.basic_action.reasoning,
        )
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
