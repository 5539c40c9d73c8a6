//! The decision engine — one call per unit per analysis cycle.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Input normalizer     (input.rs)
//!   2. Effort classifier    (effort.rs)
//!      Current-state check  (current_analysis.rs)
//!   3. Capacity simulator   (capacity_simulator.rs)
//!   4. Feasibility scorer + action selector (feasibility.rs, action_selector.rs)
//!   5. Report assembler     (report.rs)
//!
//! RULES:
//!   - Data flows forward only; stages never call each other.
//!   - Input records are borrowed, never mutated or retained.
//!   - Stages degrade to sentinels instead of failing.
//!   - The entry point never fails outward: a fault becomes `None`,
//!     logged with the unit's name.

use crate::{
    action_selector::score_and_select,
    capacity_simulator::simulate,
    config::EngineConfig,
    current_analysis::analyze_current_state,
    effort::classify_effort,
    error::{ensure_finite, EngineResult},
    input::{
        normalize, BasicInfo, FeasibilityRecord, HospitalTargets, KpiRecord, SimulationRecord,
        UnitRecords,
    },
    report::{assemble, ActionReport, StageOutputs},
};
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, Default)]
pub struct CensusEngine {
    config: EngineConfig,
}

impl CensusEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one unit. `None` means no recommendation this cycle.
    pub fn analyze(
        &self,
        kpi: &KpiRecord,
        feasibility: Option<&FeasibilityRecord>,
        simulation: Option<&SimulationRecord>,
        targets: &HospitalTargets,
    ) -> Option<ActionReport> {
        self.analyze_at(kpi, feasibility, simulation, targets, Local::now().naive_local())
    }

    pub fn analyze_unit(&self, unit: &UnitRecords, targets: &HospitalTargets) -> Option<ActionReport> {
        self.analyze(
            &unit.kpi,
            unit.feasibility.as_ref(),
            unit.simulation.as_ref(),
            targets,
        )
    }

    /// As `analyze`, with the generation timestamp supplied by the caller.
    pub fn analyze_at(
        &self,
        kpi: &KpiRecord,
        feasibility: Option<&FeasibilityRecord>,
        simulation: Option<&SimulationRecord>,
        targets: &HospitalTargets,
        generated_at: NaiveDateTime,
    ) -> Option<ActionReport> {
        match self.try_analyze(kpi, feasibility, simulation, targets, generated_at) {
            Ok(report) => Some(report),
            Err(e) => {
                log::error!(
                    "engine: action analysis failed for {}: {e}",
                    kpi.display_name()
                );
                None
            }
        }
    }

    fn try_analyze(
        &self,
        kpi: &KpiRecord,
        feasibility: Option<&FeasibilityRecord>,
        simulation: Option<&SimulationRecord>,
        targets: &HospitalTargets,
        generated_at: NaiveDateTime,
    ) -> EngineResult<ActionReport> {
        let config = &self.config;

        // 1. Normalize
        let info = normalize(kpi);
        check_displayed_figures(&info, targets)?;

        // 2. Effort + current state
        let effort = classify_effort(
            info.current_census,
            info.recent_week_census,
            info.census_achievement,
            &config.effort,
        );
        let current_analysis = analyze_current_state(&info, feasibility, config);

        // 3. Little's law what-if
        let simulation_report = simulate(&info, &config.variance);

        // 4. Feasibility + action
        let (feasibility_eval, action) = score_and_select(&info, feasibility, simulation, config);

        log::debug!(
            "engine: {}: effort={:?} action={:?} priority={:?}",
            info.dept_name,
            effort.status,
            action.action,
            action.priority
        );

        // 5. Assemble
        Ok(assemble(
            info,
            StageOutputs {
                effort,
                current_analysis,
                feasibility: feasibility_eval,
                simulation: simulation_report,
                action,
            },
            targets,
            config,
            generated_at,
        ))
    }
}

/// Figures the summary and expected effect print directly must be finite.
fn check_displayed_figures(info: &BasicInfo, targets: &HospitalTargets) -> EngineResult<()> {
    ensure_finite("daily_avg_census", info.current_census)?;
    ensure_finite("daily_census_target", info.census_target)?;
    ensure_finite("daily_census_achievement", info.census_achievement)?;
    if let Some(target) = targets.daily_census {
        ensure_finite("hospital_targets.daily_census", target)?;
    }
    if let Some(current) = targets.current_census {
        ensure_finite("hospital_targets.current_census", current)?;
    }
    Ok(())
}
