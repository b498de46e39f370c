//! Error types for the game layer.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while loading content or playing a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// A content asset is malformed or failed validation.
    #[error(transparent)]
    Content(#[from] nf_engine::ContentError),

    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A save file could not be encoded or decoded.
    #[error("save data: {0}")]
    Json(#[from] serde_json::Error),

    /// A required content asset does not exist.
    #[error("missing content asset: {0}")]
    MissingAsset(String),

    /// No scenario exists for the requested round and language.
    #[error("no scenario for round {round} in language '{language}'")]
    ScenarioNotFound {
        /// Zero-based round index.
        round: u32,
        /// Language code.
        language: String,
    },

    /// The requested campaign is not in the manifest.
    #[error("unknown campaign: {0}")]
    UnknownCampaign(String),

    /// The selected responses cost more manpower than is available.
    #[error("insufficient manpower: need {needed}, have {available}")]
    InsufficientManpower {
        /// Total cost of the selection.
        needed: u32,
        /// Manpower available.
        available: u32,
    },

    /// The game has already ended.
    #[error("the game is over")]
    GameOver,

    /// No saved game exists at the given path.
    #[error("no saved game at {0}")]
    NoSavedGame(PathBuf),
}
