//! census-runner: batch driver for the census action engine.
//!
//! Usage:
//!   census-runner --input data/departments.json
//!   census-runner --input data/departments.json --config data/engine_config.json --json

use anyhow::{Context, Result};
use census_core::{
    action_selector::Action,
    config::EngineConfig,
    engine::CensusEngine,
    input::{HospitalTargets, UnitRecords},
    report::ActionReport,
};
use std::collections::BTreeMap;
use std::env;

/// Batch file shape: hospital-wide targets plus one record set per unit.
#[derive(serde::Deserialize)]
struct Batch {
    #[serde(default)]
    hospital_targets: HospitalTargets,
    departments: Vec<UnitRecords>,
}

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    run_at: String,
    reports: Vec<Option<&'a ActionReport>>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let input = arg_value(&args, "--input").unwrap_or("./data/departments.json");
    let config_path = arg_value(&args, "--config");
    let json_mode = args.iter().any(|a| a == "--json");

    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Cannot read {input}"))?;
    let batch: Batch = serde_json::from_str(&content)
        .with_context(|| format!("Cannot parse {input}"))?;

    log::info!(
        "census-runner: {} departments from {input} (config: {})",
        batch.departments.len(),
        config_path.unwrap_or("defaults")
    );

    let engine = CensusEngine::new(config);
    let reports: Vec<Option<ActionReport>> = batch
        .departments
        .iter()
        .map(|unit| engine.analyze_unit(unit, &batch.hospital_targets))
        .collect();

    if json_mode {
        let output = JsonOutput {
            run_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            reports: reports.iter().map(Option::as_ref).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_reports(&batch.departments, &reports);
        print_tally(&reports);
    }

    Ok(())
}

fn print_reports(units: &[UnitRecords], reports: &[Option<ActionReport>]) {
    for (unit, report) in units.iter().zip(reports) {
        match report {
            Some(report) => {
                println!("{}", report.summary_text());
                let sim = &report.effect_simulation;
                if let Some(warning) = sim.variance_warning.as_ref().filter(|w| w.show_warning) {
                    println!("  ! {}", warning.message);
                }
                println!(
                    "  +1 admission/week: {:+.2} | +1 day LOS: {:+.2} | {}",
                    sim.admission_scenario.effect, sim.los_scenario.effect, sim.note
                );
                println!("  {}", report.expected_effect.description);
            }
            None => println!("【{}】 no data", unit.kpi.display_name()),
        }
        println!();
    }
}

fn print_tally(reports: &[Option<ActionReport>]) {
    let mut by_action: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut missing = 0usize;
    for report in reports {
        match report {
            Some(r) => *by_action.entry(r.basic_action.label).or_default() += 1,
            None => missing += 1,
        }
    }

    println!("=== RUN SUMMARY ===");
    println!("  departments:    {}", reports.len());
    println!("  no data:        {missing}");
    for action in [
        Action::PursueBothLevers,
        Action::PrioritizeAdmissions,
        Action::AdjustLengthOfStay,
        Action::ContinueMonitoring,
        Action::MaintainCurrentState,
    ] {
        let count = by_action.get(action.label()).copied().unwrap_or(0);
        println!("  {:<24}{count}", format!("{}:", action.label()));
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
