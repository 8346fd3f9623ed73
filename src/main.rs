//! Simulator entry point — CLI wiring and config-driven engine construction.

use std::fs::File;
use std::path::Path;
use std::process;

use heatpump_sim::config::ScenarioConfig;
use heatpump_sim::demand::HeatDemand;
use heatpump_sim::devices::{HeatPump, PerformanceModel, ThermalStorage};
use heatpump_sim::io::export::export_csv;
use heatpump_sim::sim::controller::{DirectController, GreedyStorageController};
use heatpump_sim::sim::engine::Engine;
use heatpump_sim::sim::kpi::KpiReport;
use heatpump_sim::sim::types::{SimConfig, StepResult};
use heatpump_sim::table::{CoefficientTable, CopTable};
use heatpump_sim::weather::{SyntheticWeather, TemperatureSeries};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    weather_path: Option<String>,
    cop_table_path: Option<String>,
    coefficients_path: Option<String>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("heatpump-sim — household heat-pump and thermal-storage dispatch simulator");
    eprintln!();
    eprintln!("Usage: heatpump-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (workshop, cold_snap, direct)");
    eprintln!("  --weather <path>         Hourly station statistics file (overrides synthetic weather)");
    eprintln!("  --cop-table <path>       Sparse COP CSV (overrides inline cop_points)");
    eprintln!("  --coefficients <path>    Sparse slope/offset CSV (overrides inline points)");
    eprintln!("  --telemetry-out <path>   Export step results to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the workshop preset is used.");
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires an argument");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        weather_path: None,
        cop_table_path: None,
        coefficients_path: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => cli.scenario_path = Some(take_value(&args, &mut i, "--scenario")),
            "--preset" => cli.preset = Some(take_value(&args, &mut i, "--preset")),
            "--weather" => cli.weather_path = Some(take_value(&args, &mut i, "--weather")),
            "--cop-table" => cli.cop_table_path = Some(take_value(&args, &mut i, "--cop-table")),
            "--coefficients" => {
                cli.coefficients_path = Some(take_value(&args, &mut i, "--coefficients"));
            }
            "--telemetry-out" => {
                cli.telemetry_out = Some(take_value(&args, &mut i, "--telemetry-out"));
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds the per-interval ambient series: station file when given,
/// synthetic profile otherwise.
fn build_ambient(cfg: &ScenarioConfig, weather_path: Option<&str>) -> Vec<f64> {
    match weather_path {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                eprintln!("error: cannot open weather file \"{path}\": {e}");
                process::exit(1);
            });
            let series = TemperatureSeries::from_hourly_stats(file).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                process::exit(1);
            });
            let temps = series.interval_temps().to_vec();
            if temps.is_empty() {
                eprintln!("error: weather file \"{path}\" holds fewer than two readings");
                process::exit(1);
            }
            temps
        }
        None => {
            let w = &cfg.weather;
            SyntheticWeather::new(w.mean_c, w.amplitude_c, w.period_steps, w.phase_rad)
                .generate(cfg.simulation.steps)
        }
    }
}

/// Builds the heat pump from CSV tables (when given) or inline points.
fn build_pump(
    cfg: &ScenarioConfig,
    cop_table_path: Option<&str>,
    coefficients_path: Option<&str>,
) -> HeatPump {
    let hp = &cfg.heat_pump;
    let model = match hp.model.as_str() {
        "offset" => {
            let table = match coefficients_path {
                Some(path) => {
                    let file = File::open(path).unwrap_or_else(|e| {
                        eprintln!("error: cannot open coefficients file \"{path}\": {e}");
                        process::exit(1);
                    });
                    CoefficientTable::from_csv(file).unwrap_or_else(|e| {
                        eprintln!("error: {e}");
                        process::exit(1);
                    })
                }
                None => {
                    if hp.coefficient_points.is_empty() {
                        eprintln!(
                            "error: heat_pump.model is \"offset\" but no coefficient \
                             points or --coefficients file were given"
                        );
                        process::exit(1);
                    }
                    let samples: Vec<(f64, f64, f64)> = hp
                        .coefficient_points
                        .iter()
                        .map(|p| (p.temperature_c, p.slope, p.offset))
                        .collect();
                    CoefficientTable::from_samples(&samples)
                }
            };
            PerformanceModel::OffsetConverter(table)
        }
        _ => {
            let table = match cop_table_path {
                Some(path) => {
                    let file = File::open(path).unwrap_or_else(|e| {
                        eprintln!("error: cannot open COP table \"{path}\": {e}");
                        process::exit(1);
                    });
                    CopTable::from_csv(file).unwrap_or_else(|e| {
                        eprintln!("error: {e}");
                        process::exit(1);
                    })
                }
                None => {
                    if hp.cop_points.is_empty() {
                        eprintln!(
                            "error: heat_pump.model is \"cop\" but no cop_points or \
                             --cop-table file were given"
                        );
                        process::exit(1);
                    }
                    let samples: Vec<(f64, f64)> = hp
                        .cop_points
                        .iter()
                        .map(|p| (p.temperature_c, p.cop))
                        .collect();
                    CopTable::from_samples(&samples)
                }
            };
            PerformanceModel::CopCurve(table)
        }
    };

    HeatPump::new(hp.nominal_heat_kw, hp.min_load, model)
}

/// Runs the simulation with the configured controller and returns results
/// and the KPI report.
fn run_simulation(cfg: &ScenarioConfig, ambient_c: Vec<f64>, pump: HeatPump) -> (Vec<StepResult>, KpiReport) {
    let sim_config = SimConfig::new(ambient_c.len(), cfg.simulation.dt_hours);
    let demand = HeatDemand::new(cfg.demand.rate_kw_per_k, cfg.demand.threshold_c);
    let storage = ThermalStorage::new(
        cfg.storage.capacity_kwh,
        cfg.storage.loss_rate_per_step,
        cfg.storage.initial_content_kwh,
    );
    let price = cfg.grid.price_eur_per_kwh;
    let dt = sim_config.dt_hours;

    let results = if cfg.simulation.controller == "direct" {
        let mut engine = Engine::new(
            sim_config,
            ambient_c,
            demand,
            pump,
            storage,
            DirectController,
            price,
        );
        engine.run()
    } else {
        let mut engine = Engine::new(
            sim_config,
            ambient_c,
            demand,
            pump,
            storage,
            GreedyStorageController,
            price,
        );
        engine.run()
    };

    let kpi = KpiReport::from_results(&results, dt);
    (results, kpi)
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then workshop default
    let scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::workshop()
    };

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    let ambient_c = build_ambient(&scenario, cli.weather_path.as_deref());
    let pump = build_pump(
        &scenario,
        cli.cop_table_path.as_deref(),
        cli.coefficients_path.as_deref(),
    );
    let (results, kpi) = run_simulation(&scenario, ambient_c, pump);

    // Print per-step results
    for r in &results {
        println!("{r}");
    }

    // Print KPI report
    println!("\n{kpi}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
