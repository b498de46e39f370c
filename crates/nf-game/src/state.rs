//! The game-state owner: round, meter, manpower, pre-bunks and history.

use std::collections::BTreeSet;

use nf_engine::GameSnapshot;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::history::{History, RoundRecord};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The meter finished at or above the victory threshold.
    Victory,
    /// The meter finished at or below the defeat threshold.
    Defeat,
    /// Neither threshold was reached.
    Stalemate,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victory => write!(f, "Victory"),
            Self::Defeat => write!(f, "Defeat"),
            Self::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Mutable state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Zero-based round index.
    pub round: u32,
    /// Public-trust meter.
    pub meter: i32,
    /// Manpower available.
    pub manpower: u32,
    /// Themes pre-bunked so far.
    pub pre_bunks_used: BTreeSet<String>,
    /// Completed rounds.
    #[serde(default, rename = "scenarioHistory")]
    pub history: History,
    /// Whether the final round has been played.
    #[serde(default)]
    pub finished: bool,
}

impl GameState {
    /// A fresh game at round one.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            round: 0,
            meter: 0,
            manpower: config.starting_manpower,
            pre_bunks_used: BTreeSet::new(),
            history: History::new(),
            finished: false,
        }
    }

    /// Start over.
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// The read-only view handed to the engine.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            meter: self.meter,
            manpower: self.manpower,
            pre_bunks_used: self.pre_bunks_used.clone(),
        }
    }

    /// Shift the meter, keeping it within the configured bounds.
    pub fn update_meter(&mut self, delta: i32, config: &GameConfig) -> i32 {
        self.meter = config.clamp_meter(self.meter.saturating_add(delta));
        self.meter
    }

    /// Spend manpower, never going below zero.
    pub fn spend_manpower(&mut self, amount: u32) {
        self.manpower = self.manpower.saturating_sub(amount);
    }

    /// Gain manpower.
    pub fn add_manpower(&mut self, amount: u32) {
        self.manpower = self.manpower.saturating_add(amount);
    }

    /// Move to the next round and grant the per-turn manpower.
    pub fn advance_round(&mut self, config: &GameConfig) {
        self.round += 1;
        self.add_manpower(config.manpower_per_turn);
    }

    /// Remember that a theme has been pre-bunked.
    pub fn register_pre_bunk(&mut self, theme: &str) {
        self.pre_bunks_used.insert(theme.to_string());
    }

    /// Whether a theme has been pre-bunked.
    pub fn has_pre_bunk_for(&self, theme: &str) -> bool {
        self.pre_bunks_used.contains(theme)
    }

    /// Append a completed round to the history.
    pub fn record_round(&mut self, record: RoundRecord) {
        self.history.push(record);
    }

    /// Verdict for the current meter.
    pub fn verdict(&self, config: &GameConfig) -> Verdict {
        if self.meter >= config.victory_threshold {
            Verdict::Victory
        } else if self.meter <= config.defeat_threshold {
            Verdict::Defeat
        } else {
            Verdict::Stalemate
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.finished
    }

    /// Mark the game as ended.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert_eq!(state.round, 0);
        assert_eq!(state.meter, 0);
        assert_eq!(state.manpower, 4);
        assert!(state.history.is_empty());
        assert!(!state.is_over());
    }

    #[test]
    fn meter_is_clamped() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        assert_eq!(state.update_meter(4, &config), 4);
        assert_eq!(state.update_meter(4, &config), 5);
        assert_eq!(state.update_meter(-12, &config), -5);
    }

    #[test]
    fn manpower_never_negative() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.spend_manpower(3);
        assert_eq!(state.manpower, 1);
        state.spend_manpower(5);
        assert_eq!(state.manpower, 0);
        state.advance_round(&config);
        assert_eq!((state.round, state.manpower), (1, 2));
    }

    #[test]
    fn pre_bunks_reach_snapshot() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.register_pre_bunk("recycled-footage");
        assert!(state.has_pre_bunk_for("recycled-footage"));
        assert!(state.snapshot().has_pre_bunk_for("recycled-footage"));
        assert!(!state.has_pre_bunk_for("synthetic-media"));
    }

    #[test]
    fn verdict_thresholds() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        assert_eq!(state.verdict(&config), Verdict::Stalemate);
        state.meter = 3;
        assert_eq!(state.verdict(&config), Verdict::Victory);
        state.meter = -3;
        assert_eq!(state.verdict(&config), Verdict::Defeat);
        state.meter = -2;
        assert_eq!(state.verdict(&config), Verdict::Stalemate);
    }

    #[test]
    fn reset_restores_defaults() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.update_meter(2, &config);
        state.register_pre_bunk("x");
        state.finish();
        state.reset(&config);
        assert_eq!(state, GameState::new(&config));
    }
}
