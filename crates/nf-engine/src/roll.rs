//! Stochastic bucket selection.
//!
//! One draw picks SUCCESS, NEUTRAL or FAILURE from the adjusted triple.
//! A second, independent draw decides whether a SUCCESS or FAILURE
//! escalates to its critical variant.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::probability::Probabilities;
use crate::random::RandomSource;

/// The categorical result of one response's roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    /// A rare, outsized success.
    CriticalSuccess,
    /// The response worked.
    Success,
    /// Little changed.
    Neutral,
    /// The response backfired or fell flat.
    Failure,
    /// A rare, outsized failure.
    CriticalFailure,
}

impl Bucket {
    /// All buckets from best to worst.
    pub fn all() -> &'static [Self] {
        &[
            Self::CriticalSuccess,
            Self::Success,
            Self::Neutral,
            Self::Failure,
            Self::CriticalFailure,
        ]
    }

    /// The three buckets narrated per response type.
    pub fn ordinary() -> &'static [Self] {
        &[Self::Success, Self::Neutral, Self::Failure]
    }

    /// Whether this is a critical override.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::CriticalFailure)
    }

    /// Parse a bucket from its content key.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "CRITICAL_SUCCESS" => Some(Self::CriticalSuccess),
            "SUCCESS" => Some(Self::Success),
            "NEUTRAL" => Some(Self::Neutral),
            "FAILURE" => Some(Self::Failure),
            "CRITICAL_FAILURE" => Some(Self::CriticalFailure),
            _ => None,
        }
    }

    /// The key used for this bucket in content assets.
    pub fn key(self) -> &'static str {
        match self {
            Self::CriticalSuccess => "CRITICAL_SUCCESS",
            Self::Success => "SUCCESS",
            Self::Neutral => "NEUTRAL",
            Self::Failure => "FAILURE",
            Self::CriticalFailure => "CRITICAL_FAILURE",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success => write!(f, "Success"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Failure => write!(f, "Failure"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// Pick the ordinary bucket for a primary draw `r` in `[0, 1)`.
pub fn primary_bucket(p: &Probabilities, r: f64) -> Bucket {
    if r < p.success {
        Bucket::Success
    } else if r < p.success + p.neutral {
        Bucket::Neutral
    } else {
        Bucket::Failure
    }
}

/// Escalate an ordinary bucket given the critical draw `c` in `[0, 1)`.
pub fn escalate(bucket: Bucket, c: f64, config: &EngineConfig) -> Bucket {
    match bucket {
        Bucket::Success if c < config.critical_success_chance => Bucket::CriticalSuccess,
        Bucket::Failure if c < config.critical_failure_chance => Bucket::CriticalFailure,
        other => other,
    }
}

/// Roll one response. Draws exactly two samples: primary, then critical.
pub fn roll(p: &Probabilities, config: &EngineConfig, source: &mut dyn RandomSource) -> Bucket {
    let r = source.next_unit();
    let c = source.next_unit();
    let bucket = escalate(primary_bucket(p, r), c, config);
    if bucket.is_critical() {
        tracing::debug!(%bucket, r, c, "critical outcome");
    }
    bucket
}
