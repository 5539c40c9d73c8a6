//! Current-state analysis: where the unit stands right now.
//!
//! Reads only normalized figures and the (optional) feasibility record's
//! length-of-stay band.

use crate::{
    config::EngineConfig,
    input::{BasicInfo, FeasibilityRecord, LosRange},
    types::Census,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl AdmissionTrend {
    pub fn label(self) -> &'static str {
        match self {
            Self::Increasing => "↗️ increasing",
            Self::Decreasing => "↘️ decreasing",
            Self::Stable     => "➡️ stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LosAssessment {
    WithinRange,
    Prolonged,
    Shortened,
    Undeterminable,
}

impl LosAssessment {
    pub fn mark(self) -> &'static str {
        match self {
            Self::WithinRange    => "✅",
            Self::Prolonged      => "⚠️",
            Self::Shortened      => "📉",
            Self::Undeterminable => "❓",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WithinRange    => "within admissible range",
            Self::Prolonged      => "trending longer",
            Self::Shortened      => "trending shorter",
            Self::Undeterminable => "cannot be assessed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentAnalysis {
    pub census_gap: Census,
    /// ✅ when achievement meets the pass mark, ❌ otherwise.
    pub census_status: &'static str,
    pub admission_trend: AdmissionTrend,
    pub los_status: &'static str,
    pub los_assessment: LosAssessment,
    pub los_range: Option<LosRange>,
}

pub fn analyze_current_state(
    info: &BasicInfo,
    feasibility: Option<&FeasibilityRecord>,
    config: &EngineConfig,
) -> CurrentAnalysis {
    let census_status = if info.census_achievement >= config.action.pass_mark_pct {
        "✅"
    } else {
        "❌"
    };

    let los_range = feasibility.and_then(|f| f.los_range).filter(|range| {
        match range.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("analysis: {}: ignoring LOS band: {e}", info.dept_name);
                false
            }
        }
    });
    let los_assessment = assess_los(info.los_recent, los_range.as_ref());

    CurrentAnalysis {
        census_gap: info.census_gap(),
        census_status,
        admission_trend: admission_trend(
            info.admission_recent,
            info.admission_avg,
            config.admission_trend_band,
        ),
        los_status: los_assessment.mark(),
        los_assessment,
        los_range,
    }
}

/// Recent daily admissions against the period average, with a relative
/// dead band either side counted as stable.
pub fn admission_trend(recent: f64, average: f64, band: f64) -> AdmissionTrend {
    if recent > average * (1.0 + band) {
        AdmissionTrend::Increasing
    } else if recent < average * (1.0 - band) {
        AdmissionTrend::Decreasing
    } else {
        AdmissionTrend::Stable
    }
}

pub fn assess_los(los_recent: f64, range: Option<&LosRange>) -> LosAssessment {
    match range {
        Some(range) if los_recent > 0.0 => {
            if range.contains(los_recent) {
                LosAssessment::WithinRange
            } else if los_recent > range.upper {
                LosAssessment::Prolonged
            } else {
                LosAssessment::Shortened
            }
        }
        _ => LosAssessment::Undeterminable,
    }
}
