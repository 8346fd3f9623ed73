//! Core simulation types: configuration, step data, and controller contracts.

use std::fmt;

/// Centralized simulation configuration.
///
/// # Examples
///
/// ```
/// use heatpump_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(72, 1.0);
/// assert_eq!(cfg.total_hours(), 72.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of simulation steps (intervals).
    pub steps: usize,
    /// Duration of one step in hours.
    pub dt_hours: f64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is zero or `dt_hours` is not positive.
    pub fn new(steps: usize, dt_hours: f64) -> Self {
        assert!(steps > 0, "steps must be > 0");
        assert!(dt_hours > 0.0, "dt_hours must be > 0");
        Self { steps, dt_hours }
    }

    /// Total simulated time in hours.
    pub fn total_hours(&self) -> f64 {
        self.steps as f64 * self.dt_hours
    }
}

/// Ambient conditions and demand for one step, fed to the controller.
#[derive(Debug, Clone, Copy)]
pub struct StepInput {
    /// Current simulation timestep index.
    pub timestep: usize,
    /// Ambient temperature for this interval (°C).
    pub ambient_c: f64,
    /// Heat demand for this interval (kW, >= 0).
    pub demand_kw: f64,
    /// Whether the pump's performance table has data at this temperature.
    pub pump_available: bool,
}

/// Plant state and limits available to the controller.
#[derive(Debug, Clone, Copy)]
pub struct StepState {
    /// Stored energy after standing losses (kWh).
    pub storage_content_kwh: f64,
    /// Storage capacity (kWh).
    pub storage_capacity_kwh: f64,
    /// Minimum pump thermal output while running (kW).
    pub pump_min_heat_kw: f64,
    /// Nominal pump thermal output (kW).
    pub pump_nominal_heat_kw: f64,
    /// Step duration (hours).
    pub dt_hours: f64,
}

/// Controller decisions for one step, before device clamping.
#[derive(Debug, Clone, Copy)]
pub struct StepDispatch {
    /// Requested pump thermal output (kW, >= 0).
    pub pump_heat_kw: f64,
    /// Requested storage charging (kW, >= 0; fed from pump surplus).
    pub charge_kw: f64,
    /// Requested storage discharging (kW, >= 0).
    pub discharge_kw: f64,
}

impl StepDispatch {
    /// Dispatch with everything off.
    pub fn idle() -> Self {
        Self {
            pump_heat_kw: 0.0,
            charge_kw: 0.0,
            discharge_kw: 0.0,
        }
    }
}

/// Complete record of one simulation step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Timestep index.
    pub timestep: usize,
    /// Simulation time in hours at the interval start.
    pub time_hr: f64,
    /// Ambient temperature (°C).
    pub ambient_c: f64,
    /// Heat demand (kW).
    pub demand_kw: f64,
    /// COP at this temperature, when the COP-curve model is in use.
    pub cop: Option<f64>,
    /// Whether the pump could run at this temperature.
    pub pump_available: bool,
    /// Pump thermal output (kW).
    pub pump_heat_kw: f64,
    /// Pump electrical input (kW).
    pub pump_electrical_kw: f64,
    /// Storage charging (kW).
    pub charge_kw: f64,
    /// Storage discharging (kW).
    pub discharge_kw: f64,
    /// Stored energy at the end of the step (kWh).
    pub storage_content_kwh: f64,
    /// Standing loss during this step, as average power (kW).
    pub storage_loss_kw: f64,
    /// Heat delivered to the load (kW).
    pub delivered_kw: f64,
    /// Demand left unserved (kW, >= 0).
    pub unmet_kw: f64,
    /// Heat produced beyond demand and storage headroom (kW, >= 0).
    pub surplus_kw: f64,
    /// Electricity cost for this step (€).
    pub cost_eur: f64,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cop = match self.cop {
            Some(c) => format!("{c:.2}"),
            None => "-".to_string(),
        };
        write!(
            f,
            "t={:>4} ({:>6.1}h) | T={:>5.1} °C  demand={:>5.2} kW | \
             hp={:>5.2} kW  el={:>5.2} kW  COP={cop} | \
             chg={:>5.2}  dis={:>5.2}  store={:>5.2} kWh | \
             unmet={:.2}  surplus={:.2}",
            self.timestep,
            self.time_hr,
            self.ambient_c,
            self.demand_kw,
            self.pump_heat_kw,
            self.pump_electrical_kw,
            self.charge_kw,
            self.discharge_kw,
            self.storage_content_kwh,
            self.unmet_kw,
            self.surplus_kw,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_config_basic() {
        let cfg = SimConfig::new(72, 1.0);
        assert_eq!(cfg.steps, 72);
        assert_eq!(cfg.dt_hours, 1.0);
        assert_eq!(cfg.total_hours(), 72.0);
    }

    #[test]
    fn sim_config_sub_hourly() {
        let cfg = SimConfig::new(96, 0.25);
        assert_eq!(cfg.total_hours(), 24.0);
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_steps_panics() {
        SimConfig::new(0, 1.0);
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_dt_panics() {
        SimConfig::new(24, 0.0);
    }

    #[test]
    fn step_result_display_does_not_panic() {
        let r = StepResult {
            timestep: 3,
            time_hr: 3.0,
            ambient_c: -2.5,
            demand_kw: 8.75,
            cop: Some(2.71),
            pump_available: true,
            pump_heat_kw: 8.75,
            pump_electrical_kw: 3.23,
            charge_kw: 0.0,
            discharge_kw: 0.0,
            storage_content_kwh: 1.2,
            storage_loss_kw: 0.02,
            delivered_kw: 8.75,
            unmet_kw: 0.0,
            surplus_kw: 0.0,
            cost_eur: 1.29,
        };
        let s = format!("{r}");
        assert!(s.contains("COP=2.71"));
    }

    #[test]
    fn step_result_display_marks_missing_cop() {
        let r = StepResult {
            timestep: 0,
            time_hr: 0.0,
            ambient_c: 35.0,
            demand_kw: 0.0,
            cop: None,
            pump_available: false,
            pump_heat_kw: 0.0,
            pump_electrical_kw: 0.0,
            charge_kw: 0.0,
            discharge_kw: 0.0,
            storage_content_kwh: 0.0,
            storage_loss_kw: 0.0,
            delivered_kw: 0.0,
            unmet_kw: 0.0,
            surplus_kw: 0.0,
            cost_eur: 0.0,
        };
        assert!(format!("{r}").contains("COP=-"));
    }
}
