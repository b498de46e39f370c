//! Folding per-response results into one bounded outcome.

use serde::{Deserialize, Serialize};

use crate::content::NarrativeEntry;
use crate::probability::Probabilities;
use crate::response::{Response, ResponseType};
use crate::roll::Bucket;

/// How a single response resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseResolution {
    /// The response type that was resolved.
    pub response_type: ResponseType,
    /// Final probabilities used for the roll; `None` if the scenario had no table.
    pub probabilities: Option<Probabilities>,
    /// The rolled bucket; `None` if the scenario had no table.
    pub bucket: Option<Bucket>,
    /// The narrated result.
    pub entry: NarrativeEntry,
}

/// The resolved result of one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Total meter delta, bounded to the configured range.
    pub meter_shift: i32,
    /// Exact sum of the responses' manpower costs.
    pub manpower_cost: u32,
    /// Narrated results in response order, then the synergy entry if one fired.
    pub outcomes: Vec<NarrativeEntry>,
    /// The chosen response types in input order.
    pub response_types: Vec<ResponseType>,
    /// Whether the round moved the meter in the player's favour.
    pub success: bool,
    /// Per-response detail, in response order.
    #[serde(default)]
    pub resolutions: Vec<ResponseResolution>,
    /// The combination entry, if one fired. Also the last item of `outcomes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synergy: Option<NarrativeEntry>,
}

impl Outcome {
    /// The synergy entry, if one fired this round.
    pub fn synergy(&self) -> Option<&NarrativeEntry> {
        self.synergy.as_ref()
    }

    /// Whether any response escalated to a critical bucket.
    pub fn had_critical(&self) -> bool {
        self.resolutions
            .iter()
            .any(|r| r.bucket.is_some_and(Bucket::is_critical))
    }
}

/// Combine per-response results and the synergy result into an [`Outcome`].
///
/// The meter shift is clamped to `[-bound, bound]`; the manpower cost is the
/// literal sum of the responses' costs regardless of how they rolled.
pub fn aggregate(
    resolutions: Vec<ResponseResolution>,
    synergy: Option<NarrativeEntry>,
    responses: &[Response],
    bound: i32,
) -> Outcome {
    let raw_shift = resolutions
        .iter()
        .map(|r| r.entry.shift)
        .chain(synergy.iter().map(|s| s.shift))
        .fold(0i32, i32::saturating_add);
    let meter_shift = raw_shift.clamp(-bound, bound);
    let manpower_cost = responses.iter().map(|r| r.manpower_cost).sum();

    let mut outcomes: Vec<NarrativeEntry> = resolutions.iter().map(|r| r.entry.clone()).collect();
    outcomes.extend(synergy.iter().cloned());

    Outcome {
        meter_shift,
        manpower_cost,
        outcomes,
        response_types: responses.iter().map(|r| r.kind).collect(),
        success: meter_shift > 0,
        resolutions,
        synergy,
    }
}
