//! Integration tests for the default workshop scenario.

mod common;

use heatpump_sim::config::ScenarioConfig;
use heatpump_sim::sim::controller::GreedyStorageController;
use heatpump_sim::sim::engine::Engine;
use heatpump_sim::sim::kpi::KpiReport;

/// Build the workshop scenario engine used across integration tests.
fn build_workshop_engine() -> Engine<GreedyStorageController> {
    let cfg = ScenarioConfig::workshop();
    Engine::new(
        common::sim_config_from(&cfg),
        common::ambient_from(&cfg),
        common::demand_from(&cfg),
        common::pump_from(&cfg),
        common::storage_from(&cfg),
        GreedyStorageController,
        cfg.grid.price_eur_per_kwh,
    )
}

#[test]
fn full_run_produces_correct_step_count() {
    let mut engine = build_workshop_engine();
    let results = engine.run();
    assert_eq!(results.len(), 72);
}

#[test]
fn full_run_kpi_values_are_finite() {
    let mut engine = build_workshop_engine();
    let results = engine.run();
    let kpi = KpiReport::from_results(&results, engine.config().dt_hours);
    assert!(kpi.electricity_kwh.is_finite());
    assert!(kpi.cost_eur.is_finite());
    assert!(kpi.heat_demand_kwh.is_finite());
    assert!(kpi.heat_delivered_kwh.is_finite());
    assert!(kpi.seasonal_performance_factor.is_finite());
    assert!(kpi.peak_electrical_kw.is_finite());
}

#[test]
fn determinism_two_identical_runs_produce_identical_results() {
    let mut engine1 = build_workshop_engine();
    let mut engine2 = build_workshop_engine();

    let results1 = engine1.run();
    let results2 = engine2.run();

    assert_eq!(results1.len(), results2.len());
    for (r1, r2) in results1.iter().zip(results2.iter()) {
        assert_eq!(r1.demand_kw, r2.demand_kw);
        assert_eq!(r1.pump_heat_kw, r2.pump_heat_kw);
        assert_eq!(r1.pump_electrical_kw, r2.pump_electrical_kw);
        assert_eq!(r1.charge_kw, r2.charge_kw);
        assert_eq!(r1.discharge_kw, r2.discharge_kw);
        assert_eq!(r1.storage_content_kwh, r2.storage_content_kwh);
        assert_eq!(r1.cost_eur, r2.cost_eur);
    }
}

#[test]
fn heat_balance_holds_every_step() {
    let mut engine = build_workshop_engine();
    let results = engine.run();

    for r in &results {
        let delivered = r.pump_heat_kw + r.discharge_kw - r.charge_kw;
        assert!(
            (r.delivered_kw - delivered).abs() < 1e-9,
            "delivered mismatch at t={}: recorded {}, recomputed {}",
            r.timestep,
            r.delivered_kw,
            delivered
        );
        let residual = (delivered - r.demand_kw) - (r.surplus_kw - r.unmet_kw);
        assert!(
            (residual).abs() < 1e-9,
            "balance violated at t={}: residual {}",
            r.timestep,
            residual
        );
    }
}

#[test]
fn storage_content_stays_within_bounds() {
    let cfg = ScenarioConfig::workshop();
    let mut engine = build_workshop_engine();
    let results = engine.run();

    for r in &results {
        assert!(
            r.storage_content_kwh >= -1e-9,
            "negative storage content at t={}",
            r.timestep
        );
        assert!(
            r.storage_content_kwh <= cfg.storage.capacity_kwh + 1e-9,
            "storage over capacity at t={}: {}",
            r.timestep,
            r.storage_content_kwh
        );
    }
}

#[test]
fn pump_output_respects_operating_range() {
    let cfg = ScenarioConfig::workshop();
    let min_kw = cfg.heat_pump.min_load * cfg.heat_pump.nominal_heat_kw;
    let mut engine = build_workshop_engine();
    let results = engine.run();

    for r in &results {
        let ok = r.pump_heat_kw == 0.0
            || (r.pump_heat_kw >= min_kw - 1e-9
                && r.pump_heat_kw <= cfg.heat_pump.nominal_heat_kw + 1e-9);
        assert!(
            ok,
            "pump output outside {{0}} and [{min_kw}, {}] at t={}: {}",
            cfg.heat_pump.nominal_heat_kw, r.timestep, r.pump_heat_kw
        );
    }
}

#[test]
fn cost_is_electricity_times_price() {
    let cfg = ScenarioConfig::workshop();
    let mut engine = build_workshop_engine();
    let results = engine.run();
    let kpi = KpiReport::from_results(&results, engine.config().dt_hours);

    let expected = kpi.electricity_kwh * cfg.grid.price_eur_per_kwh;
    assert!(
        (kpi.cost_eur - expected).abs() < 1e-6,
        "cost {} does not match electricity {} at {} EUR/kWh",
        kpi.cost_eur,
        kpi.electricity_kwh,
        cfg.grid.price_eur_per_kwh
    );
}

#[test]
fn demand_and_flows_are_never_negative() {
    let mut engine = build_workshop_engine();
    let results = engine.run();

    for r in &results {
        assert!(r.demand_kw >= 0.0);
        assert!(r.pump_heat_kw >= 0.0);
        assert!(r.pump_electrical_kw >= 0.0);
        assert!(r.charge_kw >= 0.0);
        assert!(r.discharge_kw >= 0.0);
        assert!(r.unmet_kw >= 0.0);
        assert!(r.surplus_kw >= 0.0);
        assert!(r.cost_eur >= 0.0);
    }
}
