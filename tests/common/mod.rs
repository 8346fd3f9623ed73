//! Shared test fixtures for integration tests.

use heatpump_sim::config::ScenarioConfig;
use heatpump_sim::demand::HeatDemand;
use heatpump_sim::devices::{HeatPump, PerformanceModel, ThermalStorage};
use heatpump_sim::sim::types::SimConfig;
use heatpump_sim::table::{CoefficientTable, CopTable};
use heatpump_sim::weather::SyntheticWeather;

/// Simulation config derived from a scenario's `[simulation]` section.
pub fn sim_config_from(cfg: &ScenarioConfig) -> SimConfig {
    SimConfig::new(cfg.simulation.steps, cfg.simulation.dt_hours)
}

/// Synthetic ambient series with the scenario's weather parameters.
pub fn ambient_from(cfg: &ScenarioConfig) -> Vec<f64> {
    let w = &cfg.weather;
    SyntheticWeather::new(w.mean_c, w.amplitude_c, w.period_steps, w.phase_rad)
        .generate(cfg.simulation.steps)
}

/// Clamped linear demand model from the scenario's `[demand]` section.
pub fn demand_from(cfg: &ScenarioConfig) -> HeatDemand {
    HeatDemand::new(cfg.demand.rate_kw_per_k, cfg.demand.threshold_c)
}

/// Heat pump with the scenario's inline performance points.
pub fn pump_from(cfg: &ScenarioConfig) -> HeatPump {
    let hp = &cfg.heat_pump;
    let model = if hp.model == "offset" {
        let samples: Vec<(f64, f64, f64)> = hp
            .coefficient_points
            .iter()
            .map(|p| (p.temperature_c, p.slope, p.offset))
            .collect();
        PerformanceModel::OffsetConverter(CoefficientTable::from_samples(&samples))
    } else {
        let samples: Vec<(f64, f64)> = hp
            .cop_points
            .iter()
            .map(|p| (p.temperature_c, p.cop))
            .collect();
        PerformanceModel::CopCurve(CopTable::from_samples(&samples))
    };
    HeatPump::new(hp.nominal_heat_kw, hp.min_load, model)
}

/// Storage tank from the scenario's `[storage]` section.
pub fn storage_from(cfg: &ScenarioConfig) -> ThermalStorage {
    ThermalStorage::new(
        cfg.storage.capacity_kwh,
        cfg.storage.loss_rate_per_step,
        cfg.storage.initial_content_kwh,
    )
}
