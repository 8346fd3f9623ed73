/// Sensible-heat storage tank with a fractional standing loss per step.
///
/// Content is clamped to `[0, capacity]`; charge and discharge are bounded
/// by headroom and content for the step duration. There is no power limit —
/// the tank accepts whatever the hydraulics deliver within one step.
#[derive(Debug, Clone)]
pub struct ThermalStorage {
    /// Total energy capacity in kWh.
    pub capacity_kwh: f64,
    /// Fraction of content lost to standing losses each step (0.0 to 1.0).
    pub loss_rate_per_step: f64,
    content_kwh: f64,
}

impl ThermalStorage {
    /// Creates a storage tank.
    ///
    /// # Panics
    ///
    /// Panics if capacity is not positive, the loss rate is outside
    /// `[0.0, 1.0]`, or the initial content is outside `[0, capacity]`.
    pub fn new(capacity_kwh: f64, loss_rate_per_step: f64, initial_content_kwh: f64) -> Self {
        assert!(capacity_kwh > 0.0);
        assert!((0.0..=1.0).contains(&loss_rate_per_step));
        assert!((0.0..=capacity_kwh).contains(&initial_content_kwh));
        Self {
            capacity_kwh,
            loss_rate_per_step,
            content_kwh: initial_content_kwh,
        }
    }

    /// Current stored energy in kWh.
    pub fn content_kwh(&self) -> f64 {
        self.content_kwh
    }

    /// Remaining capacity in kWh.
    pub fn headroom_kwh(&self) -> f64 {
        self.capacity_kwh - self.content_kwh
    }

    /// Applies one step of standing losses and returns the energy lost in
    /// kWh.
    pub fn decay_kwh(&mut self) -> f64 {
        let loss = self.content_kwh * self.loss_rate_per_step;
        self.content_kwh -= loss;
        loss
    }

    /// Charges at up to `kw` for `dt_hours` and returns the power actually
    /// absorbed, limited by headroom.
    pub fn charge_kw(&mut self, kw: f64, dt_hours: f64) -> f64 {
        if kw <= 0.0 || dt_hours <= 0.0 {
            return 0.0;
        }
        let actual_kw = kw.min(self.headroom_kwh() / dt_hours);
        self.content_kwh = (self.content_kwh + actual_kw * dt_hours).min(self.capacity_kwh);
        actual_kw
    }

    /// Discharges at up to `kw` for `dt_hours` and returns the power
    /// actually delivered, limited by content.
    pub fn discharge_kw(&mut self, kw: f64, dt_hours: f64) -> f64 {
        if kw <= 0.0 || dt_hours <= 0.0 {
            return 0.0;
        }
        let actual_kw = kw.min(self.content_kwh / dt_hours);
        self.content_kwh = (self.content_kwh - actual_kw * dt_hours).max(0.0);
        actual_kw
    }
}
