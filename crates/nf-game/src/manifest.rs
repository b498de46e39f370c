//! The campaign manifest.
//!
//! Lists the campaigns a content pack offers and which one starts by
//! default.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// How a campaign's scenarios are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Hand-written scenarios with analyst guidance.
    Scenario,
    /// Generated scenarios with deck-building.
    Procedural,
}

impl GameMode {
    /// Parse a mode name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "scenario" => Some(Self::Scenario),
            "procedural" => Some(Self::Procedural),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scenario => write!(f, "Scenario Mode"),
            Self::Procedural => write!(f, "Procedural Mode"),
        }
    }
}

/// One campaign listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignEntry {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// How the campaign is played.
    pub mode: GameMode,
    /// Whether players can start it.
    pub enabled: bool,
}

/// The manifest of a content pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Id of the campaign started by default.
    pub default_scenario: String,
    /// All campaigns, enabled or not.
    pub scenarios: Vec<CampaignEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Campaigns players may start.
    pub fn enabled(&self) -> impl Iterator<Item = &CampaignEntry> {
        self.scenarios.iter().filter(|c| c.enabled)
    }

    /// Look up a campaign by id.
    pub fn by_id(&self, id: &str) -> GameResult<&CampaignEntry> {
        self.scenarios
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| GameError::UnknownCampaign(id.to_string()))
    }

    /// The default campaign.
    pub fn default_campaign(&self) -> GameResult<&CampaignEntry> {
        self.by_id(&self.default_scenario)
    }

    /// Whether any enabled campaign uses the given mode.
    pub fn is_mode_available(&self, mode: GameMode) -> bool {
        self.enabled().any(|c| c.mode == mode)
    }
}
