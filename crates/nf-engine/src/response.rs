//! Response types, selected responses, and the game-state snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An action category the player can spend manpower on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    /// Let the narrative run its course.
    Ignore,
    /// Publicly verify or refute the claim.
    FactCheck,
    /// Inoculate the audience against a theme before it spreads.
    PreBunk,
    /// Push a competing story.
    CounterNarrative,
    /// Attack the credibility of the source.
    DiscreditSource,
}

impl ResponseType {
    /// All response types in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Ignore,
            Self::FactCheck,
            Self::PreBunk,
            Self::CounterNarrative,
            Self::DiscreditSource,
        ]
    }

    /// Parse a response type from a content key or user input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "ignore" => Some(Self::Ignore),
            "fact_check" | "factcheck" | "fact" => Some(Self::FactCheck),
            "pre_bunk" | "prebunk" => Some(Self::PreBunk),
            "counter_narrative" | "counternarrative" | "counter" => Some(Self::CounterNarrative),
            "discredit_source" | "discreditsource" | "discredit" => Some(Self::DiscreditSource),
            _ => None,
        }
    }

    /// The key used for this type in content assets.
    pub fn key(self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::FactCheck => "FACT_CHECK",
            Self::PreBunk => "PRE_BUNK",
            Self::CounterNarrative => "COUNTER_NARRATIVE",
            Self::DiscreditSource => "DISCREDIT_SOURCE",
        }
    }

    /// Manpower cost of the basic variant.
    pub fn base_cost(self) -> u32 {
        match self {
            Self::Ignore => 0,
            Self::FactCheck => 2,
            Self::PreBunk => 3,
            Self::CounterNarrative => 3,
            Self::DiscreditSource => 2,
        }
    }

    /// Manpower cost of the thorough variant, if the type has one.
    pub fn thorough_cost(self) -> Option<u32> {
        match self {
            Self::FactCheck => Some(4),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignore => write!(f, "Ignore"),
            Self::FactCheck => write!(f, "Fact-Check"),
            Self::PreBunk => write!(f, "Pre-Bunk"),
            Self::CounterNarrative => write!(f, "Counter-Narrative"),
            Self::DiscreditSource => write!(f, "Discredit Source"),
        }
    }
}

/// A response the player selected for this round, with its literal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The response category.
    #[serde(rename = "type")]
    pub kind: ResponseType,
    /// Manpower this response costs. Never changed by resolution.
    pub manpower_cost: u32,
}

impl Response {
    /// A response with an explicit cost.
    pub fn new(kind: ResponseType, manpower_cost: u32) -> Self {
        Self {
            kind,
            manpower_cost,
        }
    }

    /// The basic variant at its standard cost.
    pub fn basic(kind: ResponseType) -> Self {
        Self::new(kind, kind.base_cost())
    }

    /// The thorough variant, or the basic one if the type has no upgrade.
    pub fn thorough(kind: ResponseType) -> Self {
        Self::new(kind, kind.thorough_cost().unwrap_or(kind.base_cost()))
    }

    /// Whether this is the upgraded variant of its type.
    ///
    /// A response counts as thorough when its type has a thorough cost and
    /// the response was paid at exactly that cost.
    pub fn is_thorough(&self) -> bool {
        self.kind.thorough_cost() == Some(self.manpower_cost)
    }
}

/// Read-only view of the game state handed to the engine each round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Current meter value.
    pub meter: i32,
    /// Manpower available before this round's spending.
    pub manpower: u32,
    /// Themes that have been pre-bunked in earlier rounds.
    pub pre_bunks_used: BTreeSet<String>,
}

impl GameSnapshot {
    /// Whether the given theme was pre-bunked in an earlier round.
    pub fn has_pre_bunk_for(&self, theme: &str) -> bool {
        self.pre_bunks_used.contains(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_variants() {
        assert_eq!(ResponseType::parse("FACT_CHECK"), Some(ResponseType::FactCheck));
        assert_eq!(ResponseType::parse("fact-check"), Some(ResponseType::FactCheck));
        assert_eq!(ResponseType::parse("prebunk"), Some(ResponseType::PreBunk));
        assert_eq!(
            ResponseType::parse("Counter Narrative"),
            Some(ResponseType::CounterNarrative)
        );
        assert_eq!(ResponseType::parse("discredit"), Some(ResponseType::DiscreditSource));
        assert_eq!(ResponseType::parse("shrug"), None);
    }

    #[test]
    fn keys_round_trip_through_parse() {
        for kind in ResponseType::all() {
            assert_eq!(ResponseType::parse(kind.key()), Some(*kind));
        }
    }

    #[test]
    fn serde_uses_content_keys() {
        let json = serde_json::to_string(&ResponseType::CounterNarrative).unwrap();
        assert_eq!(json, "\"COUNTER_NARRATIVE\"");
        let response: Response =
            serde_json::from_str(r#"{"type":"PRE_BUNK","manpowerCost":3}"#).unwrap();
        assert_eq!(response, Response::basic(ResponseType::PreBunk));
    }

    #[test]
    fn thorough_only_for_fact_check_at_upgrade_cost() {
        assert!(Response::thorough(ResponseType::FactCheck).is_thorough());
        assert!(!Response::basic(ResponseType::FactCheck).is_thorough());
        assert!(!Response::new(ResponseType::FactCheck, 3).is_thorough());
        assert!(!Response::thorough(ResponseType::PreBunk).is_thorough());
        assert_eq!(Response::thorough(ResponseType::PreBunk).manpower_cost, 3);
    }

    #[test]
    fn costs() {
        assert_eq!(ResponseType::Ignore.base_cost(), 0);
        assert_eq!(ResponseType::FactCheck.base_cost(), 2);
        assert_eq!(ResponseType::FactCheck.thorough_cost(), Some(4));
        assert_eq!(ResponseType::DiscreditSource.thorough_cost(), None);
    }

    #[test]
    fn display_labels() {
        assert_eq!(ResponseType::FactCheck.to_string(), "Fact-Check");
        assert_eq!(ResponseType::DiscreditSource.to_string(), "Discredit Source");
    }

    #[test]
    fn snapshot_pre_bunk_lookup() {
        let mut snapshot = GameSnapshot::default();
        snapshot.pre_bunks_used.insert("elections".to_string());
        assert!(snapshot.has_pre_bunk_for("elections"));
        assert!(!snapshot.has_pre_bunk_for("energy"));
    }
}
