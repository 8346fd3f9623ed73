use crate::table::{CoefficientTable, CopTable};

/// Performance representation mapping ambient temperature to the relation
/// between thermal output and electrical input.
#[derive(Debug, Clone)]
pub enum PerformanceModel {
    /// Constant-efficiency relation per temperature: `p_el = heat / cop(T)`.
    CopCurve(CopTable),
    /// Affine part-load relation per temperature:
    /// `heat = offset(T) + slope(T) * p_el`.
    OffsetConverter(CoefficientTable),
}

/// Air-source heat pump with a nonconvex operating range.
///
/// Thermal output is either zero or within `[min_load * nominal, nominal]`.
/// The pump is unavailable at ambient temperatures where its performance
/// table has no data; callers must treat that as "cannot run", not as zero
/// cost.
#[derive(Debug, Clone)]
pub struct HeatPump {
    /// Nominal thermal output in kW.
    pub nominal_heat_kw: f64,
    /// Minimum load fraction while running (0.0 to 1.0).
    pub min_load: f64,
    model: PerformanceModel,
}

impl HeatPump {
    /// Creates a heat pump.
    ///
    /// # Panics
    ///
    /// Panics if `nominal_heat_kw` is not positive or `min_load` is outside
    /// `[0.0, 1.0]`.
    pub fn new(nominal_heat_kw: f64, min_load: f64, model: PerformanceModel) -> Self {
        assert!(nominal_heat_kw > 0.0);
        assert!((0.0..=1.0).contains(&min_load));
        Self {
            nominal_heat_kw,
            min_load,
            model,
        }
    }

    /// Minimum thermal output while running, in kW.
    pub fn min_heat_kw(&self) -> f64 {
        self.min_load * self.nominal_heat_kw
    }

    /// `true` when the performance table has data at this temperature.
    pub fn is_available(&self, ambient_c: f64) -> bool {
        match &self.model {
            PerformanceModel::CopCurve(table) => {
                table.cop_at(ambient_c).is_some_and(|cop| cop > 0.0)
            }
            PerformanceModel::OffsetConverter(table) => table
                .coefficients_at(ambient_c)
                .is_some_and(|(slope, _)| slope > 0.0),
        }
    }

    /// COP at an ambient temperature, when the COP-curve model is in use.
    pub fn cop_at(&self, ambient_c: f64) -> Option<f64> {
        match &self.model {
            PerformanceModel::CopCurve(table) => table.cop_at(ambient_c),
            PerformanceModel::OffsetConverter(_) => None,
        }
    }

    /// Clamps a requested thermal output onto the feasible set
    /// `{0} ∪ [min_heat, nominal]`.
    ///
    /// A positive request below minimum load is raised to minimum load;
    /// whether to run at all is the controller's decision.
    pub fn clamp_heat_kw(&self, requested_kw: f64) -> f64 {
        if requested_kw <= 0.0 {
            0.0
        } else {
            requested_kw.clamp(self.min_heat_kw(), self.nominal_heat_kw)
        }
    }

    /// Electrical input in kW required for a thermal output at an ambient
    /// temperature.
    ///
    /// Returns `Some(0.0)` when the pump is off, and `None` when the
    /// performance table has no usable data at this temperature.
    pub fn electrical_input_kw(&self, ambient_c: f64, heat_kw: f64) -> Option<f64> {
        if heat_kw <= 0.0 {
            return Some(0.0);
        }
        match &self.model {
            PerformanceModel::CopCurve(table) => {
                let cop = table.cop_at(ambient_c)?;
                if cop > 0.0 { Some(heat_kw / cop) } else { None }
            }
            PerformanceModel::OffsetConverter(table) => {
                let (slope, offset) = table.coefficients_at(ambient_c)?;
                if slope > 0.0 {
                    Some(((heat_kw - offset) / slope).max(0.0))
                } else {
                    None
                }
            }
        }
    }
}
