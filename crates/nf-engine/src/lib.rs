//! Outcome resolution engine for Narrative Front.
//!
//! Turns a scenario's probability tables, the responses a player chose for a
//! round, and a read-only snapshot of the game state into a narrated,
//! bounded [`Outcome`]. Resolution is a single stateless pass: probabilities
//! are adjusted and rolled per response, each roll is narrated from the
//! [`ContentRegistry`], combinations are checked for synergy, and everything
//! is folded into one meter shift.
//!
//! All randomness flows through a [`RandomSource`], so a seeded `StdRng` or
//! a [`ScriptedSource`] gives fully reproducible rounds.

pub mod aggregate;
pub mod config;
pub mod content;
pub mod error;
pub mod narrative;
pub mod probability;
pub mod random;
pub mod resolve;
pub mod response;
pub mod roll;
pub mod scenario;
pub mod synergy;

pub use aggregate::{Outcome, ResponseResolution, aggregate};
pub use config::EngineConfig;
pub use content::{ContentRegistry, CriticalOutcome, NarrativeEntry, NarrativeSlot, ParityIssue};
pub use error::{ContentError, ContentResult};
pub use probability::{Probabilities, adjust};
pub use random::{RandomSource, ScriptedSource};
pub use resolve::{Resolver, resolve};
pub use response::{GameSnapshot, Response, ResponseType};
pub use roll::{Bucket, roll};
pub use scenario::{
    Intelligence, ProbabilityTable, Scenario, ScenarioFraming, ScenarioMetadata, ThreatTier,
    Veracity,
};
pub use synergy::{SynergyKind, SynergyRule, evaluate};
