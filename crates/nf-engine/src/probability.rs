//! Probability adjustment.
//!
//! A scenario's base table is shifted towards success by the thorough
//! upgrade and by an earlier pre-bunk of the same theme, jittered by a
//! random variance, then floored at zero and renormalised.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::random::RandomSource;
use crate::response::{Response, ResponseType};
use crate::scenario::ProbabilityTable;

/// A success/neutral/failure triple.
///
/// After [`adjust`] the three values are non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Chance of SUCCESS.
    pub success: f64,
    /// Chance of NEUTRAL.
    pub neutral: f64,
    /// Chance of FAILURE.
    pub failure: f64,
}

impl Probabilities {
    /// The fallback distribution for degenerate input.
    pub const UNIFORM: Self = Self {
        success: 1.0 / 3.0,
        neutral: 1.0 / 3.0,
        failure: 1.0 / 3.0,
    };

    /// Build a triple from raw values.
    pub fn new(success: f64, neutral: f64, failure: f64) -> Self {
        Self {
            success,
            neutral,
            failure,
        }
    }

    /// Sum of the three values.
    pub fn total(&self) -> f64 {
        self.success + self.neutral + self.failure
    }

    /// Floor every value at zero and scale so the triple sums to 1.
    ///
    /// Falls back to [`Probabilities::UNIFORM`] when nothing is left to
    /// normalise.
    pub fn normalized(self) -> Self {
        let floored = Self::new(
            self.success.max(0.0),
            self.neutral.max(0.0),
            self.failure.max(0.0),
        );
        let total = floored.total();
        if total <= 0.0 || !total.is_finite() {
            tracing::warn!(
                success = self.success,
                neutral = self.neutral,
                failure = self.failure,
                "degenerate probabilities, using uniform distribution"
            );
            return Self::UNIFORM;
        }
        Self::new(
            floored.success / total,
            floored.neutral / total,
            floored.failure / total,
        )
    }
}

impl From<&ProbabilityTable> for Probabilities {
    fn from(table: &ProbabilityTable) -> Self {
        Self::new(table.success, table.neutral, table.failure)
    }
}

/// Apply the thorough and pre-bunk bonuses to a base table.
///
/// The result is not normalised and carries no variance.
pub fn apply_bonuses(
    base: &ProbabilityTable,
    response: &Response,
    theme: Option<&str>,
    pre_bunks_used: &BTreeSet<String>,
    config: &EngineConfig,
) -> Probabilities {
    let mut p = Probabilities::from(base);

    if response.is_thorough() {
        let bonus = base.thorough_bonus.unwrap_or(0.0);
        p.success += bonus;
        p.failure -= bonus;
    }

    let pre_bunked = theme.is_some_and(|t| pre_bunks_used.contains(t));
    if response.kind == ResponseType::PreBunk && pre_bunked {
        p.success = (p.success + config.pre_bunk_bonus).clamp(0.0, 1.0);
        p.failure = (p.failure - config.pre_bunk_bonus).clamp(0.0, 1.0);
    }

    p
}

/// Map a uniform sample in `[0, 1)` to a swing in `[-variance, +variance)`.
pub fn variance_swing(sample: f64, variance: f64) -> f64 {
    (sample - 0.5) * 2.0 * variance
}

/// Shift mass between success and failure; neutral is untouched.
pub fn apply_swing(p: Probabilities, swing: f64) -> Probabilities {
    Probabilities::new(p.success + swing, p.neutral, p.failure - swing)
}

/// Produce the final probability triple for one response.
///
/// Draws exactly one sample from `source` (the variance).
pub fn adjust(
    base: &ProbabilityTable,
    response: &Response,
    theme: Option<&str>,
    pre_bunks_used: &BTreeSet<String>,
    config: &EngineConfig,
    source: &mut dyn RandomSource,
) -> Probabilities {
    let boosted = apply_bonuses(base, response, theme, pre_bunks_used, config);
    let swing = variance_swing(source.next_unit(), config.variance);
    apply_swing(boosted, swing).normalized()
}
