//! Simulation engine, controllers, heat balance, and KPI modules.

pub mod controller;
pub mod engine;
/// Heat-bus balance helpers.
pub mod heat_balance;
pub mod kpi;
pub mod types;
