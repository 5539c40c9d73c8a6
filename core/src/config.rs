//! Engine thresholds.
//!
//! Every cut-off the decision chain compares against lives here, so a
//! hospital can tune the bands without touching the engine. `Default`
//! reproduces the standard bands; a JSON file only needs the keys it
//! wants to override.

use crate::types::{Census, FeasibilityScore, Percent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortThresholds {
    /// Achievement at or above this counts as on target.
    pub target_pct: Percent,
    /// Achievement at or above this (and below target) is "near target".
    pub near_target_pct: Percent,
}

impl Default for EffortThresholds {
    fn default() -> Self {
        Self {
            target_pct: 100.0,
            near_target_pct: 85.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionThresholds {
    /// At or above: maintain current state.
    pub maintain_pct: Percent,
    /// Below: pursue both levers.
    pub urgent_below_pct: Percent,
    /// Minimum lever score for that lever to be considered actionable.
    pub actionable_score: FeasibilityScore,
    /// Achievement at or above this earns the pass mark in the summary.
    pub pass_mark_pct: Percent,
}

impl Default for ActionThresholds {
    fn default() -> Self {
        Self {
            maintain_pct: 95.0,
            urgent_below_pct: 85.0,
            actionable_score: 1,
            pass_mark_pct: 95.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeasibilityThresholds {
    pub high_score: FeasibilityScore,
    pub medium_score: FeasibilityScore,
}

impl Default for FeasibilityThresholds {
    fn default() -> Self {
        Self {
            high_score: 2,
            medium_score: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarianceThresholds {
    /// Upper bound (inclusive) of the low-variance / high-reliability tier.
    pub low_pct: Percent,
    /// Upper bound (inclusive) of the medium tier. Above is high variance.
    pub medium_pct: Percent,
}

impl Default for VarianceThresholds {
    fn default() -> Self {
        Self {
            low_pct: 20.0,
            medium_pct: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub effort: EffortThresholds,
    pub action: ActionThresholds,
    pub feasibility: FeasibilityThresholds,
    pub variance: VarianceThresholds,
    /// Relative band around average daily admissions treated as "stable".
    pub admission_trend_band: f64,
    /// Hospital-wide occupancy target when the targets record omits it.
    pub default_hospital_target: Census,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            effort: EffortThresholds::default(),
            action: ActionThresholds::default(),
            feasibility: FeasibilityThresholds::default(),
            variance: VarianceThresholds::default(),
            admission_trend_band: 0.03,
            default_hospital_target: 580.0,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Keys absent from the file keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Bands must nest the way the decision table reads them.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.effort.near_target_pct > self.effort.target_pct {
            anyhow::bail!(
                "effort.near_target_pct ({}) exceeds effort.target_pct ({})",
                self.effort.near_target_pct,
                self.effort.target_pct
            );
        }
        if self.action.urgent_below_pct > self.action.maintain_pct {
            anyhow::bail!(
                "action.urgent_below_pct ({}) exceeds action.maintain_pct ({})",
                self.action.urgent_below_pct,
                self.action.maintain_pct
            );
        }
        if self.variance.low_pct > self.variance.medium_pct {
            anyhow::bail!(
                "variance.low_pct ({}) exceeds variance.medium_pct ({})",
                self.variance.low_pct,
                self.variance.medium_pct
            );
        }
        if self.feasibility.medium_score > self.feasibility.high_score {
            anyhow::bail!(
                "feasibility.medium_score ({}) exceeds feasibility.high_score ({})",
                self.feasibility.medium_score,
                self.feasibility.high_score
            );
        }
        if !(self.admission_trend_band >= 0.0 && self.admission_trend_band < 1.0) {
            anyhow::bail!(
                "admission_trend_band must be in [0, 1), got {}",
                self.admission_trend_band
            );
        }
        Ok(())
    }
}
