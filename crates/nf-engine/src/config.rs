//! Tuning constants for outcome resolution.

/// Configuration for the resolution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Magnitude of the random swing applied to success/failure (±).
    pub variance: f64,
    /// Chance that a SUCCESS escalates to CRITICAL_SUCCESS.
    pub critical_success_chance: f64,
    /// Chance that a FAILURE escalates to CRITICAL_FAILURE.
    pub critical_failure_chance: f64,
    /// Success bonus granted to a pre-bunk whose theme was pre-bunked before.
    pub pre_bunk_bonus: f64,
    /// Absolute bound on the aggregated meter shift of one round.
    pub meter_shift_bound: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variance: 0.1,
            critical_success_chance: 0.05,
            critical_failure_chance: 0.05,
            pre_bunk_bonus: 0.2,
            meter_shift_bound: 5,
        }
    }
}

impl EngineConfig {
    /// Set the variance magnitude (clamped to 0.0-1.0).
    pub fn with_variance(mut self, variance: f64) -> Self {
        self.variance = variance.clamp(0.0, 1.0);
        self
    }

    /// Set both critical chances (each clamped to 0.0-1.0).
    pub fn with_critical_chances(mut self, success: f64, failure: f64) -> Self {
        self.critical_success_chance = success.clamp(0.0, 1.0);
        self.critical_failure_chance = failure.clamp(0.0, 1.0);
        self
    }

    /// Set the pre-bunk theme bonus (clamped to 0.0-1.0).
    pub fn with_pre_bunk_bonus(mut self, bonus: f64) -> Self {
        self.pre_bunk_bonus = bonus.clamp(0.0, 1.0);
        self
    }

    /// Set the meter shift bound (at least 1).
    pub fn with_meter_shift_bound(mut self, bound: i32) -> Self {
        self.meter_shift_bound = bound.max(1);
        self
    }

    /// A configuration with no variance and no criticals, for exact replays.
    pub fn deterministic() -> Self {
        Self::default()
            .with_variance(0.0)
            .with_critical_chances(0.0, 0.0)
    }
}
