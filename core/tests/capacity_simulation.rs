//! Capacity simulator tests — Little's law deltas and variance reconciliation.

use census_core::{
    capacity_simulator::{
        classify_variance, simulate, variance_percentage, Reliability, VarianceLevel,
        WarningLevel, VARIANCE_REASONS,
    },
    config::VarianceThresholds,
    input::{normalize, KpiRecord},
};

fn kpi(census: f64, weekly_admissions: f64, los: f64) -> KpiRecord {
    KpiRecord {
        dept_name: Some("Internal Medicine".into()),
        daily_avg_census: Some(census),
        weekly_avg_admissions: Some(weekly_admissions),
        avg_length_of_stay: Some(los),
        ..Default::default()
    }
}

fn run(census: f64, weekly_admissions: f64, los: f64) -> census_core::capacity_simulator::SimulationReport {
    simulate(&normalize(&kpi(census, weekly_admissions, los)), &VarianceThresholds::default())
}

#[test]
fn lever_effects_follow_littles_law() {
    // λ = 5/day, W = 6 days → L = 30
    let report = run(28.0, 35.0, 6.0);

    assert!(report.has_simulation);
    assert!(!report.error);

    // Admission lever: (λ + 1/7) × W − λ × W = W / 7
    let admission = report.admission_scenario.effect;
    assert!((admission - 6.0 / 7.0).abs() < 1e-9, "admission effect {admission}");

    // Stay lever: λ × (W + 1) − λ × W = λ
    let los = report.los_scenario.effect;
    assert!((los - 5.0).abs() < 1e-9, "los effect {los}");

    let calc = report.los_scenario.calculation.as_deref().unwrap_or_default();
    assert_eq!(calc, "5.00×(6.0+1) = 35.0");
    assert_eq!(report.admission_scenario.method, Some("Little's law"));
}

#[test]
fn small_variance_is_low_and_reliable() {
    let report = run(28.0, 35.0, 6.0);
    let status = report.current_status.expect("variance status");

    assert!((status.theoretical_census - 30.0).abs() < 1e-9);
    assert!((status.variance + 2.0).abs() < 1e-9);
    assert!((status.variance_percentage - 200.0 / 30.0).abs() < 1e-9);
    assert_eq!(status.variance_level, VarianceLevel::Low);
    assert_eq!(status.reliability, Reliability::High);

    let warning = report.variance_warning.expect("warning section");
    assert!(!warning.show_warning);
    assert!(warning.reasons.is_empty());
    assert!(report.note.contains("reliability: high"));
}

#[test]
fn medium_variance_shows_caution_with_reasons() {
    // L = 30, observed 40 → 33.3 %
    let report = run(40.0, 35.0, 6.0);
    let status = report.current_status.expect("variance status");
    assert_eq!(status.variance_level, VarianceLevel::Medium);
    assert_eq!(status.reliability, Reliability::Medium);

    let warning = report.variance_warning.expect("warning section");
    assert!(warning.show_warning);
    assert_eq!(warning.warning_level, WarningLevel::Caution);
    assert!(warning.message.contains("33.3%"), "message: {}", warning.message);
    assert_eq!(warning.reasons, VARIANCE_REASONS.to_vec());
}

#[test]
fn high_variance_is_reference_only() {
    // L = 30, observed 50 → 66.7 %
    let report = run(50.0, 35.0, 6.0);
    let status = report.current_status.expect("variance status");
    assert_eq!(status.variance_level, VarianceLevel::High);
    assert_eq!(status.reliability, Reliability::ReferenceOnly);

    let warning = report.variance_warning.expect("warning section");
    assert_eq!(warning.warning_level, WarningLevel::Alert);
    assert!(report.note.contains("reference only"));
}

#[test]
fn tier_boundaries_are_inclusive() {
    let t = VarianceThresholds::default();
    assert_eq!(classify_variance(20.0, &t).0, VarianceLevel::Low);
    assert_eq!(classify_variance(20.01, &t).0, VarianceLevel::Medium);
    assert_eq!(classify_variance(50.0, &t).0, VarianceLevel::Medium);
    assert_eq!(classify_variance(50.01, &t).0, VarianceLevel::High);
}

#[test]
fn zero_theoretical_occupancy_has_zero_variance() {
    assert_eq!(variance_percentage(12.0, 0.0), 0.0);

    let report = run(12.0, 0.0, 6.0);
    let status = report.current_status.expect("variance status");
    assert_eq!(status.theoretical_census, 0.0);
    assert_eq!(status.variance_percentage, 0.0);
    assert_eq!(status.variance_level, VarianceLevel::Low);
    assert_eq!(report.los_scenario.effect, 0.0);
}

#[test]
fn non_finite_input_degrades_instead_of_failing() {
    let report = run(28.0, f64::INFINITY, 6.0);

    assert!(report.error);
    assert!(!report.has_simulation);
    assert_eq!(report.admission_scenario.effect, 0.0);
    assert_eq!(report.los_scenario.effect, 0.0);
    assert!(report.current_status.is_none());
    assert!(report.admission_scenario.unit.contains("calculation error"));
}
