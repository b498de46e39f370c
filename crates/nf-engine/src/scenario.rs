//! Scenario data: the adversary inject and its per-response probabilities.
//!
//! Scenarios are immutable once loaded. The engine only reads them; the
//! content loader is expected to call [`Scenario::validate`] first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::response::ResponseType;

/// Base outcome weights for one response type in one scenario.
///
/// The weights are fractional and need not sum to 1; they are normalised
/// during adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProbabilityTable {
    /// Weight of the SUCCESS bucket.
    pub success: f64,
    /// Weight of the NEUTRAL bucket.
    pub neutral: f64,
    /// Weight of the FAILURE bucket.
    pub failure: f64,
    /// Success bonus applied when the response is the thorough variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thorough_bonus: Option<f64>,
}

impl ProbabilityTable {
    /// A table without a thorough bonus.
    pub fn new(success: f64, neutral: f64, failure: f64) -> Self {
        Self {
            success,
            neutral,
            failure,
            thorough_bonus: None,
        }
    }

    /// Attach a thorough bonus.
    pub fn with_thorough_bonus(mut self, bonus: f64) -> Self {
        self.thorough_bonus = Some(bonus);
        self
    }
}

/// Assessed truthfulness of the inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Veracity {
    /// Accurate.
    #[serde(rename = "True")]
    True,
    /// Accurate with caveats.
    #[serde(rename = "Mostly True")]
    MostlyTrue,
    /// Technically true but framed to deceive.
    #[serde(rename = "Misleading")]
    Misleading,
    /// Fabricated.
    #[serde(rename = "False")]
    False,
}

impl std::fmt::Display for Veracity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "True"),
            Self::MostlyTrue => write!(f, "Mostly True"),
            Self::Misleading => write!(f, "Misleading"),
            Self::False => write!(f, "False"),
        }
    }
}

/// Threat band derived from [`Intelligence::threat_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThreatTier {
    /// Below 4.
    Moderate,
    /// 4 up to 7.
    High,
    /// 7 and above.
    Critical,
}

impl std::fmt::Display for ThreatTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Intelligence metrics shown alongside the inject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intelligence {
    /// How long the narrative has been circulating, in hours (0.25-48).
    pub hours_active: f64,
    /// Share of amplification attributed to bots, in percent (0-100).
    pub bot_amplification: f64,
    /// Potential damage if left unanswered (1-10).
    pub damage_potential: f64,
    /// Assessed truthfulness.
    pub veracity: Veracity,
    /// How strongly the narrative plays on emotions (1-10).
    pub emotional_resonance: f64,
}

impl Intelligence {
    /// Combined threat estimate on a 0-10 scale, boosted for fresh narratives.
    pub fn threat_level(&self) -> f64 {
        let base = (self.damage_potential + self.bot_amplification / 10.0) / 2.0;
        let urgency = if self.hours_active <= 2.0 { 1.3 } else { 1.0 };
        (base * urgency).min(10.0)
    }

    /// The threat band for display.
    pub fn threat_tier(&self) -> ThreatTier {
        match self.threat_level() {
            level if level >= 7.0 => ThreatTier::Critical,
            level if level >= 4.0 => ThreatTier::High,
            _ => ThreatTier::Moderate,
        }
    }

    fn check(&self) -> Result<(), String> {
        let ranges = [
            ("hoursActive", self.hours_active, 0.25, 48.0),
            ("botAmplification", self.bot_amplification, 0.0, 100.0),
            ("damagePotential", self.damage_potential, 1.0, 10.0),
            ("emotionalResonance", self.emotional_resonance, 1.0, 10.0),
        ];
        for (name, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(format!("{name} {value} outside {min}-{max}"));
            }
        }
        Ok(())
    }
}

/// Framing lines spoken by the in-game analyst before and after a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFraming {
    /// Shown when the scenario opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Shown after the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outro: Option<String>,
}

/// Tags attached to a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Content theme, used for cross-round pre-bunk bonuses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// One round's adversary move and how each response is likely to fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier.
    pub id: String,
    /// The adversary's inject text.
    pub inject: String,
    /// Intelligence metrics, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<Intelligence>,
    /// Analyst framing text.
    #[serde(default, rename = "filter")]
    pub framing: ScenarioFraming,
    /// Base probability table per response type.
    pub probabilities: BTreeMap<ResponseType, ProbabilityTable>,
    /// Scenario tags.
    #[serde(default)]
    pub metadata: ScenarioMetadata,
}

impl Scenario {
    /// Create a scenario with just an id, inject, and theme.
    pub fn new(id: impl Into<String>, inject: impl Into<String>, theme: Option<&str>) -> Self {
        Self {
            id: id.into(),
            inject: inject.into(),
            intelligence: None,
            framing: ScenarioFraming::default(),
            probabilities: BTreeMap::new(),
            metadata: ScenarioMetadata {
                theme: theme.map(str::to_string),
            },
        }
    }

    /// Add or replace the probability table for a response type.
    pub fn with_probabilities(mut self, kind: ResponseType, table: ProbabilityTable) -> Self {
        self.probabilities.insert(kind, table);
        self
    }

    /// Parse a scenario from JSON without validating it.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The probability table for a response type, if the scenario has one.
    pub fn probabilities_for(&self, kind: ResponseType) -> Option<&ProbabilityTable> {
        self.probabilities.get(&kind)
    }

    /// The content theme, if tagged.
    pub fn theme(&self) -> Option<&str> {
        self.metadata.theme.as_deref()
    }

    /// Check that the scenario is complete enough to be offered to a player.
    ///
    /// Requires an id and inject, a probability table for every response
    /// type with finite non-negative weights, and metrics within range.
    pub fn validate(&self) -> ContentResult<()> {
        let invalid = |reason: String| ContentError::InvalidScenario {
            scenario: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("missing id".to_string()));
        }
        if self.inject.trim().is_empty() {
            return Err(invalid("missing inject".to_string()));
        }

        for kind in ResponseType::all() {
            let table = self
                .probabilities_for(*kind)
                .ok_or_else(|| invalid(format!("no probabilities for {}", kind.key())))?;
            let weights = [table.success, table.neutral, table.failure];
            if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(invalid(format!("negative or non-finite weight for {}", kind.key())));
            }
            let bonus = table.thorough_bonus.unwrap_or(0.0);
            if !(0.0..=1.0).contains(&bonus) {
                return Err(invalid(format!("thorough_bonus {bonus} outside 0-1")));
            }
        }

        if let Some(intel) = &self.intelligence {
            intel.check().map_err(invalid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Scenario {
        ResponseType::all().iter().fold(
            Scenario::new("s1", "A doctored video spreads.", Some("elections")),
            |s, kind| s.with_probabilities(*kind, ProbabilityTable::new(0.4, 0.4, 0.2)),
        )
    }

    #[test]
    fn parse_original_layout() {
        let json = r#"{
            "id": "scenario-01",
            "inject": "Claims of rigged ballots trend overnight.",
            "intelligence": {
                "hoursActive": 3,
                "botAmplification": 60,
                "damagePotential": 7,
                "veracity": "Mostly True",
                "emotionalResonance": 8
            },
            "filter": { "intro": "Eyes up.", "outro": "Logged." },
            "probabilities": {
                "FACT_CHECK": { "success": 0.6, "neutral": 0.3, "failure": 0.1, "thorough_bonus": 0.1 },
                "IGNORE": { "success": 0, "neutral": 1, "failure": 0 }
            },
            "metadata": { "theme": "elections" }
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.theme(), Some("elections"));
        assert_eq!(scenario.framing.intro.as_deref(), Some("Eyes up."));
        let fc = scenario.probabilities_for(ResponseType::FactCheck).unwrap();
        assert_eq!(fc.thorough_bonus, Some(0.1));
        let intel = scenario.intelligence.as_ref().unwrap();
        assert_eq!(intel.veracity, Veracity::MostlyTrue);
        assert!(scenario.probabilities_for(ResponseType::PreBunk).is_none());
    }

    #[test]
    fn unknown_response_key_is_rejected() {
        let json = r#"{"id":"x","inject":"y","probabilities":{"SHRUG":{"success":1,"neutral":0,"failure":0}}}"#;
        assert!(Scenario::from_json(json).is_err());
    }

    #[test]
    fn complete_scenario_validates() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn missing_table_fails_validation() {
        let mut scenario = complete();
        scenario.probabilities.remove(&ResponseType::DiscreditSource);
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("DISCREDIT_SOURCE"), "{err}");
    }

    #[test]
    fn negative_weight_fails_validation() {
        let scenario = complete().with_probabilities(
            ResponseType::Ignore,
            ProbabilityTable::new(-0.1, 0.6, 0.5),
        );
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn empty_inject_fails_validation() {
        let mut scenario = complete();
        scenario.inject = "  ".to_string();
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn metric_out_of_range_fails_validation() {
        let mut scenario = complete();
        scenario.intelligence = Some(Intelligence {
            hours_active: 0.1,
            bot_amplification: 10.0,
            damage_potential: 5.0,
            veracity: Veracity::False,
            emotional_resonance: 5.0,
        });
        let err = scenario.validate().unwrap_err();
        assert!(err.to_string().contains("hoursActive"), "{err}");
    }

    #[test]
    fn threat_level_urgency() {
        let intel = Intelligence {
            hours_active: 1.0,
            bot_amplification: 40.0,
            damage_potential: 6.0,
            veracity: Veracity::Misleading,
            emotional_resonance: 5.0,
        };
        assert!((intel.threat_level() - 6.5).abs() < 1e-9);
        let slow = Intelligence {
            hours_active: 12.0,
            ..intel
        };
        assert!((slow.threat_level() - 5.0).abs() < 1e-9);
        assert_eq!(slow.threat_tier(), ThreatTier::High);
    }

    #[test]
    fn threat_tiers() {
        let intel = |damage: f64, bots: f64| Intelligence {
            hours_active: 12.0,
            bot_amplification: bots,
            damage_potential: damage,
            veracity: Veracity::False,
            emotional_resonance: 5.0,
        };
        assert_eq!(intel(10.0, 40.0).threat_tier(), ThreatTier::Critical);
        assert_eq!(intel(4.0, 40.0).threat_tier(), ThreatTier::High);
        assert_eq!(intel(3.0, 40.0).threat_tier(), ThreatTier::Moderate);
        assert_eq!(intel(7.0, 0.0).threat_tier(), ThreatTier::Moderate);
        assert_eq!(ThreatTier::Critical.to_string(), "CRITICAL");
    }
}
