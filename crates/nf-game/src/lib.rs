//! Game layer for Narrative Front.
//!
//! Everything around the resolution engine: loading scenario packs and
//! narrative tables, owning the meter/manpower/round state, recording and
//! saving round history, running rounds through the engine, and batch
//! balance simulation.

pub mod balance;
pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod manifest;
pub mod save;
pub mod session;
pub mod state;

pub use balance::{BalanceReport, Policy, simulate};
pub use catalog::{ContentLibrary, ContentSource};
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use history::{History, RoundRecord};
pub use manifest::{CampaignEntry, GameMode, Manifest};
pub use save::{SaveFile, SavedGame};
pub use session::{GameSession, RoundReport};
pub use state::{GameState, Verdict};
