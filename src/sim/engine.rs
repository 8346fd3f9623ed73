//! Simulation engine that orchestrates demand, dispatch, and the heat balance.

use crate::demand::HeatDemand;
use crate::devices::{HeatPump, ThermalStorage};

use super::controller::Controller;
use super::heat_balance::{delivered_kw, shortfall_split};
use super::types::{SimConfig, StepInput, StepResult, StepState};

/// Simulation engine owning the plant, controller, and configuration.
///
/// Generic over `C: Controller` for static dispatch. The ambient series is
/// one temperature per interval; its length fixes the number of steps.
pub struct Engine<C: Controller> {
    config: SimConfig,
    ambient_c: Vec<f64>,
    demand: HeatDemand,
    pump: HeatPump,
    storage: ThermalStorage,
    controller: C,
    price_eur_per_kwh: f64,
}

impl<C: Controller> Engine<C> {
    /// Creates a new simulation engine.
    ///
    /// # Panics
    ///
    /// Panics if `ambient_c` does not hold exactly `config.steps` values.
    pub fn new(
        config: SimConfig,
        ambient_c: Vec<f64>,
        demand: HeatDemand,
        pump: HeatPump,
        storage: ThermalStorage,
        controller: C,
        price_eur_per_kwh: f64,
    ) -> Self {
        assert_eq!(
            ambient_c.len(),
            config.steps,
            "ambient series must provide one temperature per step"
        );
        Self {
            config,
            ambient_c,
            demand,
            pump,
            storage,
            controller,
            price_eur_per_kwh,
        }
    }

    /// Executes one simulation step and returns the result.
    pub fn step(&mut self, t: usize) -> StepResult {
        let dt = self.config.dt_hours;

        // 1. Standing losses accrue regardless of dispatch
        let storage_loss_kw = self.storage.decay_kwh() / dt;

        // 2. Read ambient conditions and derive demand
        let ambient_c = self.ambient_c[t];
        let demand_kw = self.demand.demand_kw(ambient_c);
        let pump_available = self.pump.is_available(ambient_c);

        // 3. Controller dispatch
        let input = StepInput {
            timestep: t,
            ambient_c,
            demand_kw,
            pump_available,
        };
        let state = StepState {
            storage_content_kwh: self.storage.content_kwh(),
            storage_capacity_kwh: self.storage.capacity_kwh,
            pump_min_heat_kw: self.pump.min_heat_kw(),
            pump_nominal_heat_kw: self.pump.nominal_heat_kw,
            dt_hours: dt,
        };
        let dispatch = self.controller.dispatch(&input, &state);

        // 4. Clamp through the devices
        let pump_heat_kw = if pump_available {
            self.pump.clamp_heat_kw(dispatch.pump_heat_kw)
        } else {
            0.0
        };
        // Charging can only absorb pump output beyond demand; a controller
        // cannot conjure heat onto the bus.
        let charge_request_kw = dispatch
            .charge_kw
            .min((pump_heat_kw - demand_kw).max(0.0))
            .max(0.0);
        let charge_kw = self.storage.charge_kw(charge_request_kw, dt);
        let discharge_kw = self.storage.discharge_kw(dispatch.discharge_kw.max(0.0), dt);

        // 5. Heat balance
        let delivered = delivered_kw(pump_heat_kw, discharge_kw, charge_kw);
        let (unmet_kw, surplus_kw) = shortfall_split(demand_kw, delivered);

        // 6. Electrical side
        let pump_electrical_kw = self
            .pump
            .electrical_input_kw(ambient_c, pump_heat_kw)
            .unwrap_or(0.0);
        let cost_eur = pump_electrical_kw * dt * self.price_eur_per_kwh;

        StepResult {
            timestep: t,
            time_hr: t as f64 * dt,
            ambient_c,
            demand_kw,
            cop: self.pump.cop_at(ambient_c),
            pump_available,
            pump_heat_kw,
            pump_electrical_kw,
            charge_kw,
            discharge_kw,
            storage_content_kwh: self.storage.content_kwh(),
            storage_loss_kw,
            delivered_kw: delivered,
            unmet_kw,
            surplus_kw,
            cost_eur,
        }
    }

    /// Executes all steps and returns the complete step record vector.
    pub fn run(&mut self) -> Vec<StepResult> {
        let mut results = Vec::with_capacity(self.config.steps);
        for t in 0..self.config.steps {
            results.push(self.step(t));
        }
        results
    }

    /// Returns the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns the storage tank (for content queries after a run).
    pub fn storage(&self) -> &ThermalStorage {
        &self.storage
    }
}
