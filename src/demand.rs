//! Heat demand derived from ambient temperature.

/// Clamped linear heat-demand model.
///
/// Demand rises by `rate_kw_per_k` for every kelvin the ambient temperature
/// falls below `threshold_c`, and is zero at or above the threshold.
#[derive(Debug, Clone, Copy)]
pub struct HeatDemand {
    /// Demand slope below the threshold (kW per K).
    pub rate_kw_per_k: f64,
    /// Ambient temperature above which demand is zero (°C).
    pub threshold_c: f64,
}

impl HeatDemand {
    /// Creates a demand model.
    ///
    /// # Panics
    ///
    /// Panics if `rate_kw_per_k` is negative.
    pub fn new(rate_kw_per_k: f64, threshold_c: f64) -> Self {
        assert!(rate_kw_per_k >= 0.0);
        Self {
            rate_kw_per_k,
            threshold_c,
        }
    }

    /// Heat demand in kW at an ambient temperature. Never negative.
    pub fn demand_kw(&self, ambient_c: f64) -> f64 {
        (self.rate_kw_per_k * (self.threshold_c - ambient_c)).max(0.0)
    }

    /// Maps the model over a temperature series.
    pub fn series_kw(&self, temps_c: &[f64]) -> Vec<f64> {
        temps_c.iter().map(|&t| self.demand_kw(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop_model() -> HeatDemand {
        HeatDemand::new(0.5, 15.0)
    }

    #[test]
    fn zero_at_threshold() {
        assert_eq!(workshop_model().demand_kw(15.0), 0.0);
    }

    #[test]
    fn zero_above_threshold() {
        assert_eq!(workshop_model().demand_kw(25.0), 0.0);
    }

    #[test]
    fn linear_below_threshold() {
        // 10 K below threshold at 0.5 kW/K
        assert_eq!(workshop_model().demand_kw(5.0), 5.0);
        assert_eq!(workshop_model().demand_kw(-5.0), 10.0);
    }

    #[test]
    fn never_negative() {
        let model = workshop_model();
        for t in [-30.0, -10.0, 0.0, 14.9, 15.0, 15.1, 40.0] {
            assert!(model.demand_kw(t) >= 0.0, "demand({t}) went negative");
        }
    }

    #[test]
    fn series_maps_each_temperature() {
        let demands = workshop_model().series_kw(&[5.0, 15.0, 20.0]);
        assert_eq!(demands, vec![5.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn negative_rate_panics() {
        HeatDemand::new(-0.1, 15.0);
    }
}
