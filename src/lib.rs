//! Household heat-pump and thermal-storage dispatch simulator.
//!
//! Ambient temperature (from an hourly station file or a synthetic profile)
//! drives a clamped linear heat demand; a table-characterized heat pump and
//! a lossy storage tank serve it under a rule-based dispatch controller.

pub mod config;
pub mod demand;
/// Thermal plant components: heat pump and storage tank.
pub mod devices;
pub mod io;
/// Simulation engine, controllers, heat balance, and KPI modules.
pub mod sim;
/// Performance tables on a fixed deci-degree temperature grid.
pub mod table;
pub mod weather;
