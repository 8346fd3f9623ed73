//! Thermal plant components: heat pump and storage tank.

/// Air-source heat pump with table-driven performance.
pub mod heat_pump;
/// Sensible-heat storage tank model.
pub mod storage;

pub use heat_pump::{HeatPump, PerformanceModel};
pub use storage::ThermalStorage;
