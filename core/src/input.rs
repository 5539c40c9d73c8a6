//! Input records and the normalizer.
//!
//! The caller hands the engine loosely-populated records: any numeric field
//! may be missing. Normalization turns a `KpiRecord` into `BasicInfo`, where
//! every figure is present, applying these defaults:
//!
//!   - every numeric field          → 0.0
//!   - achievement ratio            → 100.0 (no data = treated as on target)
//!   - display name                 → `dept_name`, then `ward_name`, then "Unknown"
//!
//! Input records are only ever borrowed; nothing here mutates them.

use crate::{
    error::{EngineError, EngineResult},
    types::{Census, Days, FeasibilityScore, Percent, UnitName, DAYS_PER_WEEK},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UNKNOWN_UNIT: &str = "Unknown";
const DEFAULT_ACHIEVEMENT_PCT: Percent = 100.0;

// ── Raw records (caller-owned) ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiRecord {
    pub dept_name: Option<String>,
    pub ward_name: Option<String>,
    pub daily_avg_census: Option<Census>,
    pub daily_census_target: Option<Census>,
    pub daily_census_achievement: Option<Percent>,
    pub recent_week_daily_census: Option<Census>,
    /// Weekly total admissions (averaged over the analysis period).
    pub weekly_avg_admissions: Option<f64>,
    /// Admissions in the most recent week.
    pub recent_week_admissions: Option<f64>,
    pub avg_length_of_stay: Option<Days>,
    pub recent_week_avg_los: Option<Days>,
}

impl KpiRecord {
    pub fn display_name(&self) -> &str {
        self.dept_name
            .as_deref()
            .or(self.ward_name.as_deref())
            .unwrap_or(UNKNOWN_UNIT)
    }

    pub fn achievement_pct(&self) -> Percent {
        self.daily_census_achievement
            .unwrap_or(DEFAULT_ACHIEVEMENT_PCT)
    }
}

/// Admissible length-of-stay band for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LosRange {
    pub lower: Days,
    pub upper: Days,
}

impl LosRange {
    pub fn validate(&self) -> EngineResult<()> {
        if self.lower > self.upper || self.lower.is_nan() || self.upper.is_nan() {
            return Err(EngineError::InvalidLosRange {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    pub fn contains(&self, los: Days) -> bool {
        self.lower <= los && los <= self.upper
    }
}

/// Named boolean criteria for one lever. BTreeMap keeps display order stable.
pub type Criteria = BTreeMap<String, bool>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeasibilityRecord {
    pub los_range: Option<LosRange>,
    pub admission: Criteria,
    pub los: Criteria,
}

/// Count of satisfied criteria.
pub fn criteria_score(criteria: &Criteria) -> FeasibilityScore {
    criteria.values().filter(|&&met| met).count() as FeasibilityScore
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanFigure {
    pub increase: f64,
}

/// Advisory plan figures from an external what-if tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationRecord {
    pub admission_plan: Option<PlanFigure>,
    pub los_plan: Option<PlanFigure>,
}

impl SimulationRecord {
    pub fn admission_increase(&self) -> f64 {
        self.admission_plan.as_ref().map_or(0.0, |p| p.increase)
    }

    pub fn los_increase(&self) -> f64 {
        self.los_plan.as_ref().map_or(0.0, |p| p.increase)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalTargets {
    /// Hospital-wide daily occupancy target.
    pub daily_census: Option<Census>,
    /// Hospital-wide current daily occupancy, when the caller knows it.
    pub current_census: Option<Census>,
}

/// Everything the caller supplies for one unit in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRecords {
    pub kpi: KpiRecord,
    pub feasibility: Option<FeasibilityRecord>,
    pub simulation: Option<SimulationRecord>,
}

// ── Normalized figures ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    pub dept_name: UnitName,
    pub current_census: Census,
    pub census_target: Census,
    pub census_achievement: Percent,
    pub recent_week_census: Census,
    /// Average daily admissions (weekly total ÷ 7).
    pub admission_avg: f64,
    /// Recent-week daily admissions (recent-week total ÷ 7).
    pub admission_recent: f64,
    pub los_avg: Days,
    pub los_recent: Days,
}

impl BasicInfo {
    /// Occupancy minus target; negative means below target.
    pub fn census_gap(&self) -> Census {
        self.current_census - self.census_target
    }
}

pub fn normalize(kpi: &KpiRecord) -> BasicInfo {
    BasicInfo {
        dept_name: kpi.display_name().to_string(),
        current_census: kpi.daily_avg_census.unwrap_or(0.0),
        census_target: kpi.daily_census_target.unwrap_or(0.0),
        census_achievement: kpi.achievement_pct(),
        recent_week_census: kpi.recent_week_daily_census.unwrap_or(0.0),
        admission_avg: kpi.weekly_avg_admissions.unwrap_or(0.0) / DAYS_PER_WEEK,
        admission_recent: kpi.recent_week_admissions.unwrap_or(0.0) / DAYS_PER_WEEK,
        los_avg: kpi.avg_length_of_stay.unwrap_or(0.0),
        los_recent: kpi.recent_week_avg_los.unwrap_or(0.0),
    }
}
