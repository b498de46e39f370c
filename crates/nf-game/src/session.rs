//! Running rounds through the resolution engine.
//!
//! `GameSession` owns the game state, the content library and a seeded RNG.
//! It is the caller the engine expects: it checks affordability before
//! resolving, feeds the engine a snapshot, and applies the outcome.

use std::sync::Arc;

use nf_engine::{Outcome, Resolver, Response, ResponseType, Scenario};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::ContentLibrary;
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::history::RoundRecord;
use crate::save::SavedGame;
use crate::state::{GameState, Verdict};

/// Result of one submitted round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Zero-based index of the round that was played.
    pub round: u32,
    /// The scenario that was played.
    pub scenario: Arc<Scenario>,
    /// The resolved outcome.
    pub outcome: Outcome,
    /// Meter after the outcome.
    pub meter: i32,
    /// Manpower after spending and any per-turn income.
    pub manpower: u32,
    /// Whether this was the final round.
    pub finished: bool,
}

/// One game in progress.
pub struct GameSession {
    config: GameConfig,
    library: ContentLibrary,
    resolver: Resolver,
    state: GameState,
    rng: StdRng,
}

impl GameSession {
    /// Start a new game.
    pub fn new(library: ContentLibrary, config: GameConfig) -> GameResult<Self> {
        let state = GameState::new(&config);
        Self::with_state(library, config, state)
    }

    /// Resume a saved game.
    pub fn from_saved(
        library: ContentLibrary,
        config: GameConfig,
        saved: SavedGame,
    ) -> GameResult<Self> {
        Self::with_state(library, config, saved.state)
    }

    fn with_state(
        mut library: ContentLibrary,
        config: GameConfig,
        state: GameState,
    ) -> GameResult<Self> {
        let registry = library.registry(&config.language)?;
        let resolver = Resolver::new(registry, config.engine.clone());
        // Resumed games continue on a different stream than a fresh game.
        let rng = StdRng::seed_from_u64(config.seed.wrapping_add(u64::from(state.round)));
        let mut session = Self {
            config,
            library,
            resolver,
            state,
            rng,
        };
        if !session.state.is_over() {
            for round in session.state.round..session.config.total_rounds {
                session.library.scenario(round, &session.config.language)?;
            }
        }
        Ok(session)
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The resolver bound to this game's narrative table.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Scenario for the current round.
    pub fn current_scenario(&mut self) -> GameResult<Arc<Scenario>> {
        self.library.scenario(self.state.round, &self.config.language)
    }

    /// Whether the player can pay for these responses.
    pub fn can_afford(&self, responses: &[Response]) -> bool {
        total_cost(responses) <= self.state.manpower
    }

    /// Resolve the current round with the chosen responses.
    ///
    /// An empty selection is played as a single IGNORE.
    pub fn submit(&mut self, responses: Vec<Response>) -> GameResult<RoundReport> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let needed = total_cost(&responses);
        if needed > self.state.manpower {
            return Err(GameError::InsufficientManpower {
                needed,
                available: self.state.manpower,
            });
        }
        let responses = if responses.is_empty() {
            vec![Response::basic(ResponseType::Ignore)]
        } else {
            responses
        };

        let scenario = self.current_scenario()?;
        let snapshot = self.state.snapshot();
        let outcome = self
            .resolver
            .resolve(&scenario, &responses, &snapshot, &mut self.rng);

        if let Some(theme) = scenario.theme()
            && responses.iter().any(|r| r.kind == ResponseType::PreBunk)
        {
            self.state.register_pre_bunk(theme);
        }

        let round = self.state.round;
        let record = RoundRecord::new(
            round,
            scenario.id.clone(),
            scenario.inject.clone(),
            responses,
            outcome.clone(),
            self.state.meter,
            (self.config.meter_min, self.config.meter_max),
        );
        self.state.record_round(record);
        self.state.update_meter(outcome.meter_shift, &self.config);
        self.state.spend_manpower(outcome.manpower_cost);

        let finished = round + 1 >= self.config.total_rounds;
        if finished {
            self.state.finish();
            tracing::info!(
                meter = self.state.meter,
                verdict = %self.state.verdict(&self.config),
                "game finished"
            );
        } else {
            self.state.advance_round(&self.config);
            self.library.preload(self.state.round, &self.config.language);
        }

        Ok(RoundReport {
            round,
            scenario,
            outcome,
            meter: self.state.meter,
            manpower: self.state.manpower,
            finished,
        })
    }

    /// Verdict for the current meter.
    pub fn verdict(&self) -> Verdict {
        self.state.verdict(&self.config)
    }

    /// Abandon the current game and start over at round one.
    pub fn restart(&mut self) {
        self.state.reset(&self.config);
        self.rng = StdRng::seed_from_u64(self.config.seed);
    }
}

fn total_cost(responses: &[Response]) -> u32 {
    responses.iter().map(|r| r.manpower_cost).sum()
}
