//! Capacity simulator — single-lever what-if deltas from Little's law.
//!
//! Model:
//!   L = λ × W
//!   L  theoretical occupancy (patients)
//!   λ  arrival rate (weekly admissions ÷ 7, patients/day)
//!   W  mean residence time (average length of stay, days)
//!
//! Scenarios, each against the theoretical L so both share one basis:
//!   - admission lever: λ + 1/7 (one more admission per week), W fixed
//!   - stay lever:      W + 1 day, λ fixed
//!
//! Variance reconciliation compares observed occupancy with L. The deltas
//! only mean something when L already explains most of what is observed,
//! so the report always states how reliable they are.

use crate::{
    config::VarianceThresholds,
    error::{ensure_finite, EngineResult},
    input::BasicInfo,
    types::{Census, Percent, DAYS_PER_WEEK},
};
use serde::Serialize;

const METHOD: &str = "Little's law";
const EFFECT_UNIT: &str = "patients added to daily average census";
const EFFECT_UNIT_ERROR: &str = "patients added to daily average census (calculation error)";
const ADMISSION_SCENARIO: &str = "Adding one new admission per week";
const LOS_SCENARIO: &str = "Extending average length of stay by one day";

/// Causes that commonly push observed occupancy away from λ × W.
pub const VARIANCE_REASONS: [&str; 5] = [
    "Backlog of long-stay patients",
    "Patients transferred in from other units",
    "Patients already present at the start of the period",
    "Seasonal variation in admissions",
    "Patients awaiting discharge coordination",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverScenario {
    pub description: &'static str,
    /// Change in daily average occupancy versus the theoretical baseline.
    pub effect: Census,
    pub unit: &'static str,
    pub calculation: Option<String>,
    pub method: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    High,
    Medium,
    ReferenceOnly,
}

impl Reliability {
    pub fn label(self) -> &'static str {
        match self {
            Self::High          => "high",
            Self::Medium        => "medium",
            Self::ReferenceOnly => "reference only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    Caution,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceStatus {
    pub theoretical_census: Census,
    pub actual_census: Census,
    pub variance: Census,
    pub variance_percentage: Percent,
    pub variance_level: VarianceLevel,
    pub reliability: Reliability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceWarning {
    pub show_warning: bool,
    pub warning_level: WarningLevel,
    pub message: String,
    /// Populated only when the warning is shown.
    pub reasons: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub admission_scenario: LeverScenario,
    pub los_scenario: LeverScenario,
    pub current_status: Option<VarianceStatus>,
    pub variance_warning: Option<VarianceWarning>,
    pub has_simulation: bool,
    pub error: bool,
    pub method: Option<&'static str>,
    pub note: String,
}

impl SimulationReport {
    /// Degraded-mode report: both effects zeroed, error flagged.
    pub fn degraded() -> Self {
        let zeroed = |description| LeverScenario {
            description,
            effect: 0.0,
            unit: EFFECT_UNIT_ERROR,
            calculation: None,
            method: None,
        };
        Self {
            admission_scenario: zeroed(ADMISSION_SCENARIO),
            los_scenario: zeroed(LOS_SCENARIO),
            current_status: None,
            variance_warning: None,
            has_simulation: false,
            error: true,
            method: None,
            note: "A calculation error occurred; lever effects are unavailable".into(),
        }
    }
}

/// |observed − theoretical| as a percentage of theoretical. Zero when the
/// theoretical occupancy is not positive.
pub fn variance_percentage(observed: Census, theoretical: Census) -> Percent {
    if theoretical > 0.0 {
        ((observed - theoretical) / theoretical * 100.0).abs()
    } else {
        0.0
    }
}

pub fn classify_variance(
    variance_pct: Percent,
    thresholds: &VarianceThresholds,
) -> (VarianceLevel, Reliability) {
    if variance_pct <= thresholds.low_pct {
        (VarianceLevel::Low, Reliability::High)
    } else if variance_pct <= thresholds.medium_pct {
        (VarianceLevel::Medium, Reliability::Medium)
    } else {
        (VarianceLevel::High, Reliability::ReferenceOnly)
    }
}

fn variance_message(level: VarianceLevel, variance_pct: Percent) -> String {
    match level {
        VarianceLevel::Low => "Theoretical and observed occupancy agree well".into(),
        VarianceLevel::Medium => format!(
            "Theoretical and observed occupancy differ by {variance_pct:.1}%; \
             treat the projected effects as indicative"
        ),
        VarianceLevel::High => format!(
            "Theoretical and observed occupancy differ by {variance_pct:.1}%; \
             several other factors are likely at work"
        ),
    }
}

/// Run both lever scenarios and the variance check. Never fails: faults
/// produce `SimulationReport::degraded()`.
pub fn simulate(info: &BasicInfo, thresholds: &VarianceThresholds) -> SimulationReport {
    match try_simulate(info, thresholds) {
        Ok(report) => report,
        Err(e) => {
            log::error!("simulation: {}: Little's law calculation failed: {e}", info.dept_name);
            SimulationReport::degraded()
        }
    }
}

fn try_simulate(info: &BasicInfo, thresholds: &VarianceThresholds) -> EngineResult<SimulationReport> {
    let daily_admissions = ensure_finite("admission_avg", info.admission_avg)?;
    let los = ensure_finite("los_avg", info.los_avg)?;
    let actual = ensure_finite("current_census", info.current_census)?;
    let extra_daily = 1.0 / DAYS_PER_WEEK;

    let theoretical = ensure_finite("theoretical_census", daily_admissions * los)?;

    let admission_census = (daily_admissions + extra_daily) * los;
    let admission_effect = ensure_finite("admission_effect", admission_census - theoretical)?;

    let los_census = daily_admissions * (los + 1.0);
    let los_effect = ensure_finite("los_effect", los_census - theoretical)?;

    let variance = actual - theoretical;
    let variance_pct = variance_percentage(actual, theoretical);
    let (variance_level, reliability) = classify_variance(variance_pct, thresholds);
    let show_warning = variance_pct > thresholds.low_pct;

    log::debug!(
        "simulation: {}: L={theoretical:.2} observed={actual:.2} variance={variance_pct:.1}% \
         admission+={admission_effect:.2} los+={los_effect:.2}",
        info.dept_name
    );

    Ok(SimulationReport {
        admission_scenario: LeverScenario {
            description: ADMISSION_SCENARIO,
            effect: admission_effect,
            unit: EFFECT_UNIT,
            calculation: Some(format!(
                "({daily_admissions:.3}+{extra_daily:.3})×{los:.1} = {admission_census:.1}"
            )),
            method: Some(METHOD),
        },
        los_scenario: LeverScenario {
            description: LOS_SCENARIO,
            effect: los_effect,
            unit: EFFECT_UNIT,
            calculation: Some(format!(
                "{daily_admissions:.2}×({los:.1}+1) = {los_census:.1}"
            )),
            method: Some(METHOD),
        },
        current_status: Some(VarianceStatus {
            theoretical_census: theoretical,
            actual_census: actual,
            variance,
            variance_percentage: variance_pct,
            variance_level,
            reliability,
        }),
        variance_warning: Some(VarianceWarning {
            show_warning,
            warning_level: if variance_pct <= thresholds.medium_pct {
                WarningLevel::Caution
            } else {
                WarningLevel::Alert
            },
            message: variance_message(variance_level, variance_pct),
            reasons: if show_warning {
                VARIANCE_REASONS.to_vec()
            } else {
                Vec::new()
            },
        }),
        has_simulation: true,
        error: false,
        method: Some("Little's law with variance reconciliation"),
        note: format!(
            "Theoretical estimate from Little's law (reliability: {})",
            reliability.label()
        ),
    })
}
