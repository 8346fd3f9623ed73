//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the workshop scenario. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::workshop`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and controller selection.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Synthetic weather profile parameters.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Heat demand model parameters.
    #[serde(default)]
    pub demand: DemandConfig,
    /// Heat pump parameters and inline performance points.
    #[serde(default)]
    pub heat_pump: HeatPumpConfig,
    /// Thermal storage parameters.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Grid tariff parameters.
    #[serde(default)]
    pub grid: GridConfig,
}

/// Simulation timing and controller selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of simulation steps when weather is synthetic (must be > 0).
    pub steps: usize,
    /// Step duration in hours (must be > 0).
    pub dt_hours: f64,
    /// Controller type: `"direct"` or `"greedy"`.
    pub controller: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 72,
            dt_hours: 1.0,
            controller: "greedy".to_string(),
        }
    }
}

/// Synthetic sinusoidal weather parameters, used when no station file is
/// given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Mean ambient temperature (°C).
    pub mean_c: f64,
    /// Amplitude of the daily swing (°C).
    pub amplitude_c: f64,
    /// Steps per full period.
    pub period_steps: usize,
    /// Phase offset (radians).
    pub phase_rad: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            mean_c: 4.0,
            amplitude_c: 6.0,
            period_steps: 24,
            phase_rad: 0.0,
        }
    }
}

/// Heat demand model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Demand slope below the threshold (kW per K).
    pub rate_kw_per_k: f64,
    /// Ambient temperature above which demand is zero (°C).
    pub threshold_c: f64,
}

impl Default for DemandConfig {
    fn default() -> Self {
        // 500 W per K below 15 °C
        Self {
            rate_kw_per_k: 0.5,
            threshold_c: 15.0,
        }
    }
}

/// One sparse COP characterization point.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopPoint {
    /// Ambient temperature (°C).
    pub temperature_c: f64,
    /// Coefficient of performance at that temperature.
    pub cop: f64,
}

/// One sparse offset-converter characterization point.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoefficientPoint {
    /// Ambient temperature (°C).
    pub temperature_c: f64,
    /// Slope of the affine heat/electricity relation.
    pub slope: f64,
    /// Offset of the affine heat/electricity relation (kW).
    pub offset: f64,
}

/// Heat pump parameters and inline performance points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatPumpConfig {
    /// Nominal thermal output (kW).
    pub nominal_heat_kw: f64,
    /// Minimum load fraction while running (0.0 to 1.0).
    pub min_load: f64,
    /// Performance model: `"cop"` or `"offset"`.
    pub model: String,
    /// Sparse COP points, resampled onto the dense grid at build time.
    pub cop_points: Vec<CopPoint>,
    /// Sparse slope/offset points for the offset-converter model.
    pub coefficient_points: Vec<CoefficientPoint>,
}

impl Default for HeatPumpConfig {
    fn default() -> Self {
        Self {
            nominal_heat_kw: 9.1,
            min_load: 0.5,
            model: "cop".to_string(),
            cop_points: vec![
                CopPoint { temperature_c: -10.0, cop: 2.1 },
                CopPoint { temperature_c: -5.0, cop: 2.4 },
                CopPoint { temperature_c: 0.0, cop: 2.8 },
                CopPoint { temperature_c: 5.0, cop: 3.3 },
                CopPoint { temperature_c: 7.0, cop: 3.5 },
                CopPoint { temperature_c: 10.0, cop: 3.8 },
                CopPoint { temperature_c: 15.0, cop: 4.3 },
                CopPoint { temperature_c: 20.0, cop: 4.9 },
            ],
            coefficient_points: vec![
                CoefficientPoint { temperature_c: -10.0, slope: 2.3, offset: -0.6 },
                CoefficientPoint { temperature_c: 0.0, slope: 3.0, offset: -0.8 },
                CoefficientPoint { temperature_c: 10.0, slope: 3.7, offset: -1.0 },
                CoefficientPoint { temperature_c: 20.0, slope: 4.4, offset: -1.2 },
            ],
        }
    }
}

/// Thermal storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Total capacity (kWh).
    pub capacity_kwh: f64,
    /// Fraction of content lost each step (0.0 to 1.0).
    pub loss_rate_per_step: f64,
    /// Initial content (kWh).
    pub initial_content_kwh: f64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // roughly 1.5 m³ of water with 5 K of usable spread
        Self {
            capacity_kwh: 8.7,
            loss_rate_per_step: 0.02,
            initial_content_kwh: 0.0,
        }
    }
}

/// Grid tariff parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Electricity price (€ per kWh).
    pub price_eur_per_kwh: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            price_eur_per_kwh: 0.4,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.steps"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the workshop scenario (the original tutorial constants:
    /// 9.1 kW pump, 8.7 kWh tank, 0.40 €/kWh, 0.5 kW/K below 15 °C).
    pub fn workshop() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            weather: WeatherConfig::default(),
            demand: DemandConfig::default(),
            heat_pump: HeatPumpConfig::default(),
            storage: StorageConfig::default(),
            grid: GridConfig::default(),
        }
    }

    /// Returns the cold-snap preset: a week of frost dipping below the
    /// table's lower bound, stressing nominal power and storage.
    pub fn cold_snap() -> Self {
        Self {
            simulation: SimulationConfig {
                steps: 168,
                ..SimulationConfig::default()
            },
            weather: WeatherConfig {
                mean_c: -4.0,
                amplitude_c: 7.0,
                ..WeatherConfig::default()
            },
            storage: StorageConfig {
                initial_content_kwh: 8.7,
                ..StorageConfig::default()
            },
            ..Self::workshop()
        }
    }

    /// Returns the direct preset: no storage assistance, pump follows
    /// demand.
    pub fn direct() -> Self {
        Self {
            simulation: SimulationConfig {
                controller: "direct".to_string(),
                ..SimulationConfig::default()
            },
            ..Self::workshop()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["workshop", "cold_snap", "direct"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "workshop" => Ok(Self::workshop()),
            "cold_snap" => Ok(Self::cold_snap()),
            "direct" => Ok(Self::direct()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.steps == 0 {
            errors.push(ConfigError {
                field: "simulation.steps".into(),
                message: "must be > 0".into(),
            });
        }
        if s.dt_hours <= 0.0 {
            errors.push(ConfigError {
                field: "simulation.dt_hours".into(),
                message: "must be > 0".into(),
            });
        }
        if s.controller != "direct" && s.controller != "greedy" {
            errors.push(ConfigError {
                field: "simulation.controller".into(),
                message: format!("must be \"direct\" or \"greedy\", got \"{}\"", s.controller),
            });
        }

        let w = &self.weather;
        if w.period_steps == 0 {
            errors.push(ConfigError {
                field: "weather.period_steps".into(),
                message: "must be > 0".into(),
            });
        }
        if w.amplitude_c < 0.0 {
            errors.push(ConfigError {
                field: "weather.amplitude_c".into(),
                message: "must be >= 0".into(),
            });
        }

        if self.demand.rate_kw_per_k < 0.0 {
            errors.push(ConfigError {
                field: "demand.rate_kw_per_k".into(),
                message: "must be >= 0".into(),
            });
        }

        let hp = &self.heat_pump;
        if hp.nominal_heat_kw <= 0.0 {
            errors.push(ConfigError {
                field: "heat_pump.nominal_heat_kw".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&hp.min_load) {
            errors.push(ConfigError {
                field: "heat_pump.min_load".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if hp.model != "cop" && hp.model != "offset" {
            errors.push(ConfigError {
                field: "heat_pump.model".into(),
                message: format!("must be \"cop\" or \"offset\", got \"{}\"", hp.model),
            });
        }

        let st = &self.storage;
        if st.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "storage.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&st.loss_rate_per_step) {
            errors.push(ConfigError {
                field: "storage.loss_rate_per_step".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if st.capacity_kwh > 0.0 && !(0.0..=st.capacity_kwh).contains(&st.initial_content_kwh) {
            errors.push(ConfigError {
                field: "storage.initial_content_kwh".into(),
                message: "must be in [0, storage.capacity_kwh]".into(),
            });
        }

        if self.grid.price_eur_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "grid.price_eur_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}
