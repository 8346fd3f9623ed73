//! Post-hoc KPI computation from simulation results.

use std::fmt;

use super::types::StepResult;

/// Aggregate key performance indicators derived from a complete run.
///
/// Computed post-hoc from `Vec<StepResult>` to ensure consistency between
/// step data and reported metrics.
#[derive(Debug, Clone)]
pub struct KpiReport {
    /// Total electricity drawn by the pump (kWh).
    pub electricity_kwh: f64,
    /// Total electricity cost (€).
    pub cost_eur: f64,
    /// Total heat demand (kWh).
    pub heat_demand_kwh: f64,
    /// Heat actually delivered to the load (kWh).
    pub heat_delivered_kwh: f64,
    /// Heat produced by the pump (kWh).
    pub pump_heat_kwh: f64,
    /// Demand left unserved (kWh).
    pub unmet_kwh: f64,
    /// Heat produced beyond demand and storage headroom (kWh).
    pub surplus_kwh: f64,
    /// Storage standing losses (kWh).
    pub storage_loss_kwh: f64,
    /// Seasonal performance factor: pump heat over electricity.
    pub seasonal_performance_factor: f64,
    /// Peak electrical draw (kW).
    pub peak_electrical_kw: f64,
    /// Steps with the pump running.
    pub pump_runtime_steps: usize,
    /// Steps where the performance table had no data.
    pub no_data_steps: usize,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    pub fn from_results(results: &[StepResult], dt_hours: f64) -> Self {
        let mut electricity_kwh = 0.0;
        let mut cost_eur = 0.0;
        let mut heat_demand_kwh = 0.0;
        let mut heat_delivered_kwh = 0.0;
        let mut pump_heat_kwh = 0.0;
        let mut unmet_kwh = 0.0;
        let mut surplus_kwh = 0.0;
        let mut storage_loss_kwh = 0.0;
        let mut peak_electrical_kw = 0.0_f64;
        let mut pump_runtime_steps = 0;
        let mut no_data_steps = 0;

        for r in results {
            electricity_kwh += r.pump_electrical_kw * dt_hours;
            cost_eur += r.cost_eur;
            heat_demand_kwh += r.demand_kw * dt_hours;
            heat_delivered_kwh += (r.demand_kw - r.unmet_kw) * dt_hours;
            pump_heat_kwh += r.pump_heat_kw * dt_hours;
            unmet_kwh += r.unmet_kw * dt_hours;
            surplus_kwh += r.surplus_kw * dt_hours;
            storage_loss_kwh += r.storage_loss_kw * dt_hours;
            peak_electrical_kw = peak_electrical_kw.max(r.pump_electrical_kw);
            if r.pump_heat_kw > 0.0 {
                pump_runtime_steps += 1;
            }
            if !r.pump_available {
                no_data_steps += 1;
            }
        }

        let seasonal_performance_factor = if electricity_kwh > 0.0 {
            pump_heat_kwh / electricity_kwh
        } else {
            0.0
        };

        Self {
            electricity_kwh,
            cost_eur,
            heat_demand_kwh,
            heat_delivered_kwh,
            pump_heat_kwh,
            unmet_kwh,
            surplus_kwh,
            storage_loss_kwh,
            seasonal_performance_factor,
            peak_electrical_kw,
            pump_runtime_steps,
            no_data_steps,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(
            f,
            "Electricity demand:    {:.1} kWh ({:.2} EUR)",
            self.electricity_kwh, self.cost_eur
        )?;
        writeln!(f, "Heat demand:           {:.1} kWh", self.heat_demand_kwh)?;
        writeln!(
            f,
            "Heat delivered:        {:.1} kWh ({:.1} kWh unmet)",
            self.heat_delivered_kwh, self.unmet_kwh
        )?;
        writeln!(
            f,
            "Pump heat output:      {:.1} kWh (SPF {:.2})",
            self.pump_heat_kwh, self.seasonal_performance_factor
        )?;
        writeln!(
            f,
            "Surplus heat:          {:.1} kWh, storage losses {:.1} kWh",
            self.surplus_kwh, self.storage_loss_kwh
        )?;
        writeln!(
            f,
            "Peak electrical draw:  {:.2} kW",
            self.peak_electrical_kw
        )?;
        write!(
            f,
            "Pump runtime:          {} steps ({} without table data)",
            self.pump_runtime_steps, self.no_data_steps
        )
    }
}
