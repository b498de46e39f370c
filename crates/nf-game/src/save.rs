//! Saving and restoring games as JSON files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::state::GameState;

/// A game state stamped with the time it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// The saved state.
    #[serde(flatten)]
    pub state: GameState,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
}

impl SavedGame {
    /// Stamp a state with the current time.
    pub fn now(state: GameState) -> Self {
        Self {
            state,
            saved_at: Utc::now(),
        }
    }
}

/// A save slot on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    /// A save slot at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the save file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a save exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the state, replacing any previous save.
    pub fn save(&self, state: &GameState) -> GameResult<SavedGame> {
        let saved = SavedGame::now(state.clone());
        let json = serde_json::to_string_pretty(&saved)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| GameError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), round = state.round, "game saved");
        Ok(saved)
    }

    /// Read the saved game.
    pub fn load(&self) -> GameResult<SavedGame> {
        if !self.exists() {
            return Err(GameError::NoSavedGame(self.path.clone()));
        }
        let json = std::fs::read_to_string(&self.path).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })?;
        let saved: SavedGame = serde_json::from_str(&json)?;
        tracing::info!(
            path = %self.path.display(),
            round = saved.state.round,
            saved_at = %saved.saved_at,
            "game loaded"
        );
        Ok(saved)
    }

    /// Delete the save. Succeeds if there was nothing to delete.
    pub fn clear(&self) -> GameResult<()> {
        if !self.exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "save cleared");
        Ok(())
    }
}
