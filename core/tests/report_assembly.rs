//! End-to-end engine tests: scenarios, current-state analysis, expected
//! effect and the summary text.

use census_core::{
    action_selector::{Action, DecisionBasis},
    capacity_simulator::VarianceLevel,
    config::EngineConfig,
    current_analysis::{admission_trend, AdmissionTrend, LosAssessment},
    effort::{EffortStatus, EffortTier},
    engine::CensusEngine,
    input::{Criteria, FeasibilityRecord, HospitalTargets, KpiRecord, LosRange},
    report::{expected_effect, ActionReport, EffectStatus, Impact},
};
use chrono::{NaiveDate, NaiveDateTime};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .expect("valid timestamp")
}

fn cardiology_kpi() -> KpiRecord {
    KpiRecord {
        dept_name: Some("Cardiology".into()),
        daily_avg_census: Some(28.0),
        daily_census_target: Some(30.0),
        daily_census_achievement: Some(93.3),
        recent_week_daily_census: Some(29.0),
        weekly_avg_admissions: Some(35.0),
        recent_week_admissions: Some(35.0),
        avg_length_of_stay: Some(6.0),
        recent_week_avg_los: Some(6.5),
        ..Default::default()
    }
}

fn admission_only_feasibility() -> FeasibilityRecord {
    let admission: Criteria = [("bed_availability".to_string(), true)].into_iter().collect();
    let los: Criteria = [("discharge_planning".to_string(), false)].into_iter().collect();
    FeasibilityRecord {
        los_range: Some(LosRange { lower: 5.0, upper: 7.0 }),
        admission,
        los,
    }
}

fn run(kpi: &KpiRecord, feasibility: Option<&FeasibilityRecord>) -> Option<ActionReport> {
    init_logging();
    CensusEngine::default().analyze_at(kpi, feasibility, None, &HospitalTargets::default(), fixed_time())
}

#[test]
fn near_target_unit_with_bed_capacity_prioritizes_admissions() {
    let feasibility = admission_only_feasibility();
    let report = run(&cardiology_kpi(), Some(&feasibility)).expect("report");

    let status = report.effect_simulation.current_status.as_ref().expect("variance");
    assert!((status.theoretical_census - 30.0).abs() < 1e-9);
    assert_eq!(status.variance_level, VarianceLevel::Low);

    assert_eq!(report.effort_status.status, EffortStatus::ClosingGap);
    assert_eq!(report.effort_status.level, EffortTier::Improving);

    assert_eq!(report.feasibility_evaluation.admission_feasibility.score, 1);
    assert_eq!(report.feasibility_evaluation.los_feasibility.score, 0);
    assert_eq!(report.basic_action.action, Action::PrioritizeAdmissions);
    assert_eq!(report.basic_action.basis, DecisionBasis::BedCapacityAvailable);

    assert_eq!(report.current_analysis.census_gap, -2.0);
    assert_eq!(report.current_analysis.census_status, "❌");
    assert_eq!(report.current_analysis.admission_trend, AdmissionTrend::Stable);
    assert_eq!(report.current_analysis.los_assessment, LosAssessment::WithinRange);
    assert_eq!(report.generated_at, fixed_time());
}

#[test]
fn large_shortfall_always_pursues_both_levers() {
    let mut kpi = cardiology_kpi();
    kpi.daily_census_achievement = Some(70.0);
    let feasibility = admission_only_feasibility();

    for record in [None, Some(&feasibility)] {
        let report = run(&kpi, record).expect("report");
        assert_eq!(report.basic_action.action, Action::PursueBothLevers);
        assert_eq!(report.effort_status.level, EffortTier::Poor);
    }
}

#[test]
fn missing_feasibility_falls_through_to_monitoring() {
    let report = run(&cardiology_kpi(), None).expect("report");

    assert_eq!(report.feasibility_evaluation.admission_feasibility.score, 0);
    assert_eq!(report.feasibility_evaluation.los_feasibility.score, 0);
    assert_eq!(report.basic_action.action, Action::ContinueMonitoring);
    assert_eq!(report.current_analysis.los_assessment, LosAssessment::Undeterminable);
    assert!(report.current_analysis.los_range.is_none());
}

#[test]
fn missing_feasibility_does_not_override_achievement_extremes() {
    let mut kpi = cardiology_kpi();
    kpi.daily_census_achievement = Some(97.0);
    let report = run(&kpi, None).expect("report");
    assert_eq!(report.basic_action.action, Action::MaintainCurrentState);
}

#[test]
fn empty_kpi_still_produces_a_report() {
    let report = run(&KpiRecord::default(), None).expect("report");

    assert_eq!(report.basic_info.dept_name, "Unknown");
    assert_eq!(report.basic_info.census_achievement, 100.0);
    assert_eq!(report.basic_action.action, Action::MaintainCurrentState);
    assert_eq!(report.expected_effect.status, EffectStatus::Achieved);
}

#[test]
fn non_finite_displayed_figure_yields_none() {
    let mut kpi = cardiology_kpi();
    kpi.daily_avg_census = Some(f64::NAN);
    assert!(run(&kpi, None).is_none());

    let targets = HospitalTargets {
        daily_census: Some(f64::INFINITY),
        current_census: None,
    };
    let report = CensusEngine::default().analyze(&cardiology_kpi(), None, None, &targets);
    assert!(report.is_none());
}

#[test]
fn stage_faults_degrade_without_losing_the_report() {
    let mut kpi = cardiology_kpi();
    kpi.recent_week_daily_census = Some(f64::NAN);
    kpi.avg_length_of_stay = Some(f64::INFINITY);

    let report = run(&kpi, None).expect("report");
    assert_eq!(report.effort_status.status, EffortStatus::Undeterminable);
    assert!(report.effect_simulation.error);
    assert_eq!(report.basic_action.action, Action::ContinueMonitoring);
}

#[test]
fn inverted_los_band_is_ignored() {
    let mut feasibility = admission_only_feasibility();
    feasibility.los_range = Some(LosRange { lower: 9.0, upper: 4.0 });

    let report = run(&cardiology_kpi(), Some(&feasibility)).expect("report");
    assert_eq!(report.current_analysis.los_assessment, LosAssessment::Undeterminable);
    assert!(report.current_analysis.los_range.is_none());
}

#[test]
fn los_band_assessment() {
    let mut kpi = cardiology_kpi();
    let feasibility = admission_only_feasibility();

    kpi.recent_week_avg_los = Some(8.2);
    let report = run(&kpi, Some(&feasibility)).expect("report");
    assert_eq!(report.current_analysis.los_assessment, LosAssessment::Prolonged);
    assert_eq!(report.current_analysis.los_status, "⚠️");

    kpi.recent_week_avg_los = Some(4.0);
    let report = run(&kpi, Some(&feasibility)).expect("report");
    assert_eq!(report.current_analysis.los_assessment, LosAssessment::Shortened);

    kpi.recent_week_avg_los = None;
    let report = run(&kpi, Some(&feasibility)).expect("report");
    assert_eq!(report.current_analysis.los_assessment, LosAssessment::Undeterminable);
}

#[test]
fn admission_trend_uses_three_percent_band() {
    assert_eq!(admission_trend(6.0, 5.0, 0.03), AdmissionTrend::Increasing);
    assert_eq!(admission_trend(4.0, 5.0, 0.03), AdmissionTrend::Decreasing);
    assert_eq!(admission_trend(5.1, 5.0, 0.03), AdmissionTrend::Stable);
    assert_eq!(admission_trend(0.0, 0.0, 0.03), AdmissionTrend::Stable);
}

#[test]
fn expected_effect_contribution() {
    let config = EngineConfig::default();

    let achieved = expected_effect(0.0, 30.0, &HospitalTargets::default(), &config);
    assert_eq!(achieved.status, EffectStatus::Achieved);
    assert_eq!(achieved.impact, Impact::Positive);

    let targets = HospitalTargets {
        daily_census: Some(580.0),
        current_census: Some(560.0),
    };
    let potential = expected_effect(-10.0, 40.0, &targets, &config);
    assert_eq!(potential.status, EffectStatus::Potential);
    assert_eq!(potential.contribution_percentage, Some(50.0));
    assert!(potential.description.contains("50.0%"));

    let over = HospitalTargets {
        daily_census: Some(580.0),
        current_census: Some(600.0),
    };
    let maintained = expected_effect(-5.0, 40.0, &over, &config);
    assert_eq!(maintained.status, EffectStatus::Maintained);
    assert_eq!(maintained.impact, Impact::Stable);
    assert_eq!(maintained.contribution_percentage, None);
}

#[test]
fn expected_effect_defaults_to_unit_census_and_580_target() {
    let effect = expected_effect(-2.0, 28.0, &HospitalTargets::default(), &EngineConfig::default());
    let pct = effect.contribution_percentage.expect("potential");
    assert!((pct - 2.0 / 552.0 * 100.0).abs() < 1e-9);
}

#[test]
fn summary_text_lists_key_figures() {
    let feasibility = admission_only_feasibility();
    let report = run(&cardiology_kpi(), Some(&feasibility)).expect("report");
    let summary = report.summary_text();

    assert!(summary.starts_with("【Cardiology】💪 Closing the gap"), "{summary}");
    assert!(summary.contains("Current: 28.0 patients (target: 30.0)"));
    assert!(summary.contains("Achievement: 93.3% ❌"));
    assert!(summary.contains("Recommended action: Prioritize admissions"));
    assert!(summary.contains("Reason: Beds are available"));
}

#[test]
fn summary_uses_placeholder_for_missing_target() {
    let mut kpi = cardiology_kpi();
    kpi.daily_census_target = None;
    let report = run(&kpi, None).expect("report");
    assert!(report.summary_text().contains("(target: --)"));
}

#[test]
fn json_export_carries_all_sections() {
    let report = run(&cardiology_kpi(), Some(&admission_only_feasibility())).expect("report");
    let json = report.to_json().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse back");

    for section in [
        "basic_info",
        "effort_status",
        "current_analysis",
        "feasibility_evaluation",
        "effect_simulation",
        "basic_action",
        "expected_effect",
    ] {
        assert!(value.get(section).is_some(), "missing section {section}");
    }
    assert_eq!(value["generated_at"], "2026-10-19 08:30:00");
    assert_eq!(value["basic_action"]["action"], "prioritize_admissions");
    assert_eq!(value["effort_status"]["level"], "improving");
}
