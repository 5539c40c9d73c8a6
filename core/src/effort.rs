//! Effort classifier — how hard a unit is working toward its occupancy target.
//!
//! Two inputs drive the classification:
//!   1. achievement ratio (occupancy as % of target)
//!   2. week-over-week trend (recent-week occupancy − current occupancy)
//!
//! Decision table (evaluated top to bottom):
//!
//!   achievement ≥ target      trend > 0   → BreakingThrough   (excellent)
//!   achievement ≥ target      trend ≤ 0   → Sustaining        (good)
//!   achievement ≥ near-target trend > 0   → ClosingGap        (improving)
//!   achievement ≥ near-target trend ≤ 0   → NeedsEffort       (caution)
//!   otherwise                 any         → NeedsImprovement  (poor)
//!
//! A non-finite input yields `Undeterminable`; the classifier never fails.

use crate::{
    config::EffortThresholds,
    error::{ensure_finite, EngineResult},
    types::{Census, Percent},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortTier {
    Excellent,
    Good,
    Improving,
    Caution,
    Poor,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortStatus {
    BreakingThrough,
    Sustaining,
    ClosingGap,
    NeedsEffort,
    NeedsImprovement,
    Undeterminable,
}

impl EffortStatus {
    pub fn tier(self) -> EffortTier {
        match self {
            Self::BreakingThrough  => EffortTier::Excellent,
            Self::Sustaining       => EffortTier::Good,
            Self::ClosingGap       => EffortTier::Improving,
            Self::NeedsEffort      => EffortTier::Caution,
            Self::NeedsImprovement => EffortTier::Poor,
            Self::Undeterminable   => EffortTier::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BreakingThrough  => "Breaking through target",
            Self::Sustaining       => "Sustaining target",
            Self::ClosingGap       => "Closing the gap",
            Self::NeedsEffort      => "Needs more effort",
            Self::NeedsImprovement => "Needs improvement",
            Self::Undeterminable   => "Undeterminable",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::BreakingThrough  => "✨",
            Self::Sustaining       => "🎯",
            Self::ClosingGap       => "💪",
            Self::NeedsEffort      => "📈",
            Self::NeedsImprovement => "🚨",
            Self::Undeterminable   => "❓",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::BreakingThrough  => "#4CAF50",
            Self::Sustaining       => "#7fb069",
            Self::ClosingGap       => "#FF9800",
            Self::NeedsEffort      => "#FFC107",
            Self::NeedsImprovement => "#F44336",
            Self::Undeterminable   => "#9E9E9E",
        }
    }

    /// Human-readable description. `trend` is interpolated for the two
    /// improving statuses and ignored otherwise.
    pub fn describe(self, trend: Census) -> String {
        match self {
            Self::BreakingThrough => {
                format!("Target achieved and still improving (+{trend:.1} patients)")
            }
            Self::Sustaining => "Target achievement is being sustained".into(),
            Self::ClosingGap => {
                format!("Almost at target and improving (+{trend:.1} patients)")
            }
            Self::NeedsEffort => "Close to target; further effort is needed".into(),
            Self::NeedsImprovement => {
                "Active measures are needed to reach the target".into()
            }
            Self::Undeterminable => "Insufficient data to evaluate effort".into(),
        }
    }
}

/// Classifier output as carried in the result record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortEvaluation {
    pub status: EffortStatus,
    pub level: EffortTier,
    pub label: &'static str,
    pub emoji: &'static str,
    pub description: String,
    pub color: &'static str,
    /// Recent-week minus current occupancy; absent when undeterminable.
    pub trend: Option<Census>,
}

impl EffortEvaluation {
    fn new(status: EffortStatus, trend: Option<Census>) -> Self {
        Self {
            status,
            level: status.tier(),
            label: status.label(),
            emoji: status.emoji(),
            description: status.describe(trend.unwrap_or(0.0)),
            color: status.color(),
            trend,
        }
    }

    pub fn undeterminable() -> Self {
        Self::new(EffortStatus::Undeterminable, None)
    }

    pub fn badge(&self) -> EffortBadge {
        EffortBadge {
            emoji: self.emoji,
            status: self.label,
            color: self.color,
            level: self.level,
        }
    }
}

/// Compact display form of an effort evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffortBadge {
    pub emoji: &'static str,
    pub status: &'static str,
    pub color: &'static str,
    pub level: EffortTier,
}

/// Classify a unit's effort. Never fails: faults become `Undeterminable`.
pub fn classify_effort(
    current_census: Census,
    recent_week_census: Census,
    achievement_pct: Percent,
    thresholds: &EffortThresholds,
) -> EffortEvaluation {
    match try_classify_effort(current_census, recent_week_census, achievement_pct, thresholds) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            log::error!("effort: classification failed: {e}");
            EffortEvaluation::undeterminable()
        }
    }
}

fn try_classify_effort(
    current_census: Census,
    recent_week_census: Census,
    achievement_pct: Percent,
    thresholds: &EffortThresholds,
) -> EngineResult<EffortEvaluation> {
    let achievement = ensure_finite("census_achievement", achievement_pct)?;
    let trend = ensure_finite("census_trend", recent_week_census - current_census)?;
    let improving = trend > 0.0;

    let status = if achievement >= thresholds.target_pct {
        if improving {
            EffortStatus::BreakingThrough
        } else {
            EffortStatus::Sustaining
        }
    } else if achievement >= thresholds.near_target_pct {
        if improving {
            EffortStatus::ClosingGap
        } else {
            EffortStatus::NeedsEffort
        }
    } else {
        EffortStatus::NeedsImprovement
    };

    Ok(EffortEvaluation::new(status, Some(trend)))
}
