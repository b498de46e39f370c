//! Configuration for a game.

use nf_engine::EngineConfig;

/// Rules and tuning for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Manpower at the start of round one.
    pub starting_manpower: u32,
    /// Manpower gained when a new round begins.
    pub manpower_per_turn: u32,
    /// Rounds in a campaign.
    pub total_rounds: u32,
    /// Lowest meter value.
    pub meter_min: i32,
    /// Highest meter value.
    pub meter_max: i32,
    /// Final meter at or above which the player wins.
    pub victory_threshold: i32,
    /// Final meter at or below which the player loses.
    pub defeat_threshold: i32,
    /// RNG seed for reproducible games.
    pub seed: u64,
    /// Content language code.
    pub language: String,
    /// Resolution engine tuning.
    pub engine: EngineConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_manpower: 4,
            manpower_per_turn: 2,
            total_rounds: 6,
            meter_min: -5,
            meter_max: 5,
            victory_threshold: 3,
            defeat_threshold: -3,
            seed: 42,
            language: "en".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of rounds (at least 1).
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = rounds.max(1);
        self
    }

    /// Set the content language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the starting manpower.
    pub fn with_starting_manpower(mut self, manpower: u32) -> Self {
        self.starting_manpower = manpower;
        self
    }

    /// Replace the engine configuration.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Clamp a meter value to the configured bounds.
    pub fn clamp_meter(&self, value: i32) -> i32 {
        value.clamp(self.meter_min, self.meter_max)
    }
}
