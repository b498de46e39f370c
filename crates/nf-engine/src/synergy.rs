//! Combination bonuses and penalties.
//!
//! The rules form an ordered table. They are checked top to bottom against
//! the response types chosen this round and the first match wins, so a
//! round contributes at most one synergy entry.

use serde::{Deserialize, Serialize};

use crate::content::{ContentRegistry, NarrativeEntry};
use crate::response::ResponseType;

/// Identifies a synergy rule and its text in the content pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SynergyKind {
    /// Pre-bunk primed the audience for the fact-check.
    PreBunkFactCheck,
    /// A counter-narrative carried the fact-check further.
    CounterFactCheck,
    /// Fact-checking while attacking the source; flavor only.
    FactCheckDiscredit,
    /// Several fact-checks duplicated effort.
    MultipleFactChecks,
}

impl SynergyKind {
    /// All kinds in priority order.
    pub fn all() -> &'static [Self] {
        &[
            Self::PreBunkFactCheck,
            Self::CounterFactCheck,
            Self::FactCheckDiscredit,
            Self::MultipleFactChecks,
        ]
    }

    /// The key of this rule's text in the `COMBINED` content section.
    pub fn key(self) -> &'static str {
        match self {
            Self::PreBunkFactCheck => "SYNERGY_PREBUNK_FACTCHECK",
            Self::CounterFactCheck => "SYNERGY_COUNTER_FACTCHECK",
            Self::FactCheckDiscredit => "SYNERGY_FACTCHECK_DISCREDIT",
            Self::MultipleFactChecks => "INEFFICIENCY_MULTIPLE_FACTCHECKS",
        }
    }
}

impl std::fmt::Display for SynergyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreBunkFactCheck => write!(f, "Pre-Bunk + Fact-Check"),
            Self::CounterFactCheck => write!(f, "Counter-Narrative + Fact-Check"),
            Self::FactCheckDiscredit => write!(f, "Fact-Check + Discredit Source"),
            Self::MultipleFactChecks => write!(f, "Multiple Fact-Checks"),
        }
    }
}

/// When a synergy rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Both types were chosen.
    Both(ResponseType, ResponseType),
    /// The type was chosen more than once.
    Repeated(ResponseType),
}

impl Condition {
    /// Whether the chosen types satisfy this condition.
    pub fn matches(&self, types: &[ResponseType]) -> bool {
        match self {
            Self::Both(a, b) => types.contains(a) && types.contains(b),
            Self::Repeated(kind) => types.iter().filter(|t| *t == kind).count() > 1,
        }
    }
}

/// A declarative synergy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynergyRule {
    /// Which rule this is.
    pub kind: SynergyKind,
    /// When it fires.
    pub condition: Condition,
    /// Meter delta it contributes.
    pub shift: i32,
}

/// The synergy rules in priority order.
pub const RULES: [SynergyRule; 4] = [
    SynergyRule {
        kind: SynergyKind::PreBunkFactCheck,
        condition: Condition::Both(ResponseType::PreBunk, ResponseType::FactCheck),
        shift: 1,
    },
    SynergyRule {
        kind: SynergyKind::CounterFactCheck,
        condition: Condition::Both(ResponseType::CounterNarrative, ResponseType::FactCheck),
        shift: 1,
    },
    SynergyRule {
        kind: SynergyKind::FactCheckDiscredit,
        condition: Condition::Both(ResponseType::FactCheck, ResponseType::DiscreditSource),
        shift: 0,
    },
    SynergyRule {
        kind: SynergyKind::MultipleFactChecks,
        condition: Condition::Repeated(ResponseType::FactCheck),
        shift: -1,
    },
];

/// The first rule matching the chosen types, if any.
///
/// Fewer than two responses never match.
pub fn matching_rule(types: &[ResponseType]) -> Option<&'static SynergyRule> {
    if types.len() < 2 {
        return None;
    }
    RULES.iter().find(|rule| rule.condition.matches(types))
}

/// Evaluate the chosen types and narrate the winning rule, if any.
pub fn evaluate(types: &[ResponseType], registry: &ContentRegistry) -> Option<NarrativeEntry> {
    let rule = matching_rule(types)?;
    tracing::debug!(synergy = rule.kind.key(), shift = rule.shift, "synergy fired");
    let text = match registry.synergy_text(rule.kind) {
        Some(text) => text.to_string(),
        None => {
            tracing::warn!(synergy = rule.kind.key(), "no synergy text, using label");
            rule.kind.to_string()
        }
    };
    Some(NarrativeEntry::new(text, rule.shift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseType::*;

    fn registry() -> ContentRegistry {
        SynergyKind::all().iter().fold(
            ContentRegistry::new(NarrativeEntry::new("w", 3), NarrativeEntry::new("l", -3)),
            |r, kind| r.with_synergy_text(*kind, kind.key().to_lowercase()),
        )
    }

    fn kind_of(types: &[ResponseType]) -> Option<SynergyKind> {
        matching_rule(types).map(|r| r.kind)
    }

    #[test]
    fn single_response_never_fires() {
        assert_eq!(kind_of(&[FactCheck]), None);
        assert_eq!(evaluate(&[PreBunk], &registry()), None);
    }

    #[test]
    fn pre_bunk_plus_fact_check_bonus() {
        let entry = evaluate(&[PreBunk, FactCheck], &registry()).unwrap();
        assert_eq!(entry.shift, 1);
        assert_eq!(entry.text, "synergy_prebunk_factcheck");
    }

    #[test]
    fn counter_plus_fact_check_bonus() {
        assert_eq!(kind_of(&[FactCheck, CounterNarrative]), Some(SynergyKind::CounterFactCheck));
    }

    #[test]
    fn fact_check_plus_discredit_is_flavor() {
        let entry = evaluate(&[DiscreditSource, FactCheck], &registry()).unwrap();
        assert_eq!(entry.shift, 0);
    }

    #[test]
    fn duplicate_fact_checks_penalised_once() {
        let entry = evaluate(&[FactCheck, FactCheck, FactCheck], &registry()).unwrap();
        assert_eq!(entry.shift, -1);
    }

    #[test]
    fn priority_order_first_match_wins() {
        assert_eq!(
            kind_of(&[FactCheck, FactCheck, PreBunk, CounterNarrative, DiscreditSource]),
            Some(SynergyKind::PreBunkFactCheck)
        );
        assert_eq!(
            kind_of(&[CounterNarrative, FactCheck, DiscreditSource]),
            Some(SynergyKind::CounterFactCheck)
        );
        assert_eq!(
            kind_of(&[FactCheck, DiscreditSource, FactCheck]),
            Some(SynergyKind::FactCheckDiscredit)
        );
    }

    #[test]
    fn unrelated_combinations_do_nothing() {
        assert_eq!(kind_of(&[Ignore, PreBunk]), None);
        assert_eq!(kind_of(&[PreBunk, PreBunk]), None);
        assert_eq!(kind_of(&[CounterNarrative, DiscreditSource]), None);
    }

    #[test]
    fn missing_text_uses_label() {
        let bare = ContentRegistry::new(NarrativeEntry::new("w", 3), NarrativeEntry::new("l", -3));
        let entry = evaluate(&[PreBunk, FactCheck], &bare).unwrap();
        assert_eq!(entry.text, "Pre-Bunk + Fact-Check");
    }
}
