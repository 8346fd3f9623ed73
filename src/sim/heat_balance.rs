//! Heat-bus balance computation.

/// Heat reaching the load bus from pump output and storage flows.
///
/// All inputs are non-negative magnitudes; charging draws from the bus,
/// discharging feeds it.
pub fn delivered_kw(pump_heat_kw: f64, discharge_kw: f64, charge_kw: f64) -> f64 {
    pump_heat_kw + discharge_kw - charge_kw
}

/// Splits the demand/delivery mismatch into `(unmet, surplus)`.
///
/// Both values are non-negative and at most one of them is nonzero.
pub fn shortfall_split(demand_kw: f64, delivered_kw: f64) -> (f64, f64) {
    let unmet = (demand_kw - delivered_kw).max(0.0);
    let surplus = (delivered_kw - demand_kw).max(0.0);
    (unmet, surplus)
}
