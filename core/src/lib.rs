//! Census capacity diagnostics: turns one unit's occupancy KPIs into a
//! structured recommendation.
//!
//! Entry point: `engine::CensusEngine::analyze`.

pub mod action_selector;
pub mod capacity_simulator;
pub mod config;
pub mod current_analysis;
pub mod effort;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod input;
pub mod report;
pub mod types;
