//! Content loading.
//!
//! A content pack is a directory with a `manifest.json`, one
//! `outcomes-<lang>.json` narrative table per language, and per-round
//! scenarios under `scenarios/scenario-NN-<lang>.json` (NN is the one-based
//! round, zero padded). An English pack is compiled into the crate.
//!
//! Loaded assets are validated once and cached, so repeated lookups for the
//! same round and language are free.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use nf_engine::{ContentRegistry, Scenario};

use crate::error::{GameError, GameResult};
use crate::manifest::Manifest;

const BUILTIN_FILES: &[(&str, &str)] = &[
    ("manifest.json", include_str!("../content/manifest.json")),
    ("outcomes-en.json", include_str!("../content/outcomes-en.json")),
    (
        "scenarios/scenario-01-en.json",
        include_str!("../content/scenarios/scenario-01-en.json"),
    ),
    (
        "scenarios/scenario-02-en.json",
        include_str!("../content/scenarios/scenario-02-en.json"),
    ),
    (
        "scenarios/scenario-03-en.json",
        include_str!("../content/scenarios/scenario-03-en.json"),
    ),
    (
        "scenarios/scenario-04-en.json",
        include_str!("../content/scenarios/scenario-04-en.json"),
    ),
    (
        "scenarios/scenario-05-en.json",
        include_str!("../content/scenarios/scenario-05-en.json"),
    ),
    (
        "scenarios/scenario-06-en.json",
        include_str!("../content/scenarios/scenario-06-en.json"),
    ),
];

/// Where content assets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// The pack compiled into the binary.
    Builtin,
    /// A content directory on disk.
    Directory(PathBuf),
}

impl ContentSource {
    /// Read an asset by its path relative to the pack root.
    ///
    /// Returns `Ok(None)` when the asset does not exist.
    fn read(&self, relative: &str) -> GameResult<Option<String>> {
        match self {
            Self::Builtin => Ok(BUILTIN_FILES
                .iter()
                .find(|(name, _)| *name == relative)
                .map(|(_, body)| body.to_string())),
            Self::Directory(root) => {
                let path = root.join(relative);
                if !path.exists() {
                    return Ok(None);
                }
                std::fs::read_to_string(&path)
                    .map(Some)
                    .map_err(|source| GameError::Io { path, source })
            }
        }
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in pack"),
            Self::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Path of a round's scenario, relative to the pack root.
pub fn scenario_path(round: u32, language: &str) -> String {
    format!("scenarios/scenario-{:02}-{language}.json", round + 1)
}

/// Path of a language's narrative table, relative to the pack root.
pub fn outcomes_path(language: &str) -> String {
    format!("outcomes-{language}.json")
}

/// A content pack with cached, validated assets.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    source: ContentSource,
    manifest: Manifest,
    registries: HashMap<String, Arc<ContentRegistry>>,
    scenarios: HashMap<(u32, String), Arc<Scenario>>,
}

impl ContentLibrary {
    /// Open a content pack and read its manifest.
    pub fn open(source: ContentSource) -> GameResult<Self> {
        let json = source
            .read("manifest.json")?
            .ok_or_else(|| GameError::MissingAsset(format!("{source}: manifest.json")))?;
        let manifest = Manifest::from_json(&json)?;
        tracing::debug!(%source, campaigns = manifest.scenarios.len(), "opened content pack");
        Ok(Self {
            source,
            manifest,
            registries: HashMap::new(),
            scenarios: HashMap::new(),
        })
    }

    /// Open the compiled-in English pack.
    pub fn builtin() -> GameResult<Self> {
        Self::open(ContentSource::Builtin)
    }

    /// Open a pack from a directory.
    pub fn from_dir(dir: &Path) -> GameResult<Self> {
        Self::open(ContentSource::Directory(dir.to_path_buf()))
    }

    /// Where this pack is read from.
    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    /// The pack's manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The narrative table for a language.
    pub fn registry(&mut self, language: &str) -> GameResult<Arc<ContentRegistry>> {
        if let Some(registry) = self.registries.get(language) {
            return Ok(Arc::clone(registry));
        }
        let path = outcomes_path(language);
        let json = self
            .source
            .read(&path)?
            .ok_or_else(|| GameError::MissingAsset(path.clone()))?;
        let registry = Arc::new(ContentRegistry::from_json(&json)?);
        for (kind, bucket) in registry.missing_slots() {
            tracing::warn!(
                language,
                response_type = kind.key(),
                bucket = bucket.key(),
                "narrative table has no entries"
            );
        }
        tracing::debug!(language, "loaded narrative table");
        self.registries
            .insert(language.to_string(), Arc::clone(&registry));
        Ok(registry)
    }

    /// The validated scenario for a zero-based round.
    pub fn scenario(&mut self, round: u32, language: &str) -> GameResult<Arc<Scenario>> {
        let key = (round, language.to_string());
        if let Some(scenario) = self.scenarios.get(&key) {
            tracing::trace!(round, language, "scenario cache hit");
            return Ok(Arc::clone(scenario));
        }
        let json = self
            .source
            .read(&scenario_path(round, language))?
            .ok_or_else(|| GameError::ScenarioNotFound {
                round,
                language: language.to_string(),
            })?;
        let scenario = Scenario::from_json(&json)?;
        scenario.validate()?;
        tracing::debug!(round, language, scenario = %scenario.id, "loaded scenario");
        let scenario = Arc::new(scenario);
        self.scenarios.insert(key, Arc::clone(&scenario));
        Ok(scenario)
    }

    /// Load a round ahead of time. Failures are logged and otherwise ignored.
    pub fn preload(&mut self, round: u32, language: &str) -> bool {
        match self.scenario(round, language) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(round, language, error = %e, "could not preload scenario");
                false
            }
        }
    }

    /// Check a language's narrative table and its first `rounds` scenarios.
    ///
    /// Returns one line per problem; an empty list means the pack is playable.
    pub fn validate(&mut self, language: &str, rounds: u32) -> Vec<String> {
        let mut problems = Vec::new();
        match self.registry(language) {
            Ok(registry) => {
                for (kind, bucket) in registry.missing_slots() {
                    problems.push(format!(
                        "{}: no narratives for {}/{}",
                        outcomes_path(language),
                        kind.key(),
                        bucket.key()
                    ));
                }
            }
            Err(e) => problems.push(e.to_string()),
        }
        for round in 0..rounds {
            if let Err(e) = self.scenario(round, language) {
                problems.push(format!("{}: {e}", scenario_path(round, language)));
            }
        }
        problems
    }
}
