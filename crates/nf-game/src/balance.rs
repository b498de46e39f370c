//! Batch balance simulation.
//!
//! Plays many seeded games with a fixed response policy and tallies how they
//! end. Used to tune scenario probability tables and narrative shifts.

use std::collections::BTreeMap;

use nf_engine::synergy::matching_rule;
use nf_engine::{Bucket, Response, ResponseType, SynergyKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::ContentLibrary;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::session::GameSession;
use crate::state::Verdict;

/// How the simulated player picks responses each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Always ignore.
    Passive,
    /// Fact-check every round, thorough when affordable.
    FactCheck,
    /// A random affordable combination.
    Random,
}

impl Policy {
    /// All policies.
    pub fn all() -> &'static [Self] {
        &[Self::Passive, Self::FactCheck, Self::Random]
    }

    /// Parse a policy name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "passive" | "ignore" => Some(Self::Passive),
            "fact-check" | "factcheck" | "fact" => Some(Self::FactCheck),
            "random" => Some(Self::Random),
            _ => None,
        }
    }

    /// Choose responses given the manpower available.
    pub fn choose(self, manpower: u32, rng: &mut StdRng) -> Vec<Response> {
        match self {
            Self::Passive => Vec::new(),
            Self::FactCheck => {
                let thorough = Response::thorough(ResponseType::FactCheck);
                let basic = Response::basic(ResponseType::FactCheck);
                if thorough.manpower_cost <= manpower {
                    vec![thorough]
                } else if basic.manpower_cost <= manpower {
                    vec![basic]
                } else {
                    Vec::new()
                }
            }
            Self::Random => {
                let mut budget = manpower;
                let mut picks = Vec::new();
                for kind in ResponseType::all() {
                    if *kind == ResponseType::Ignore || !rng.random_bool(0.5) {
                        continue;
                    }
                    let response = if rng.random_bool(0.5) {
                        Response::thorough(*kind)
                    } else {
                        Response::basic(*kind)
                    };
                    if response.manpower_cost <= budget {
                        budget -= response.manpower_cost;
                        picks.push(response);
                    }
                }
                picks
            }
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passive => write!(f, "passive"),
            Self::FactCheck => write!(f, "fact-check"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// Aggregate results of a simulation batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceReport {
    /// Games played.
    pub games: u32,
    /// Games ending in victory.
    pub victories: u32,
    /// Games ending in defeat.
    pub defeats: u32,
    /// Games ending in neither.
    pub stalemates: u32,
    /// Sum of final meter values.
    pub total_final_meter: i64,
    /// How often each bucket was rolled.
    pub bucket_counts: BTreeMap<Bucket, u32>,
    /// How often each synergy fired.
    pub synergies: BTreeMap<SynergyKind, u32>,
    /// Rounds resolved across all games.
    pub rounds: u32,
}

impl BalanceReport {
    /// Mean final meter value.
    pub fn average_final_meter(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_final_meter as f64 / f64::from(self.games)
        }
    }

    /// Share of games won, 0-1.
    pub fn victory_rate(&self) -> f64 {
        rate(self.victories, self.games)
    }

    /// Share of all rolls that landed in a bucket, 0-1.
    pub fn bucket_rate(&self, bucket: Bucket) -> f64 {
        let total: u32 = self.bucket_counts.values().sum();
        rate(self.bucket_counts.get(&bucket).copied().unwrap_or(0), total)
    }

    fn record_verdict(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Victory => self.victories += 1,
            Verdict::Defeat => self.defeats += 1,
            Verdict::Stalemate => self.stalemates += 1,
        }
    }
}

fn rate(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(total)
    }
}

/// A copy of `library` with the narrative table and every scenario loaded,
/// so clones handed to each game share them.
fn primed(library: &ContentLibrary, config: &GameConfig) -> GameResult<ContentLibrary> {
    let mut library = library.clone();
    library.registry(&config.language)?;
    for round in 0..config.total_rounds {
        library.scenario(round, &config.language)?;
    }
    Ok(library)
}

/// Play `games` full campaigns and tally the results.
///
/// Game `i` is seeded with `config.seed + i`, so a batch is reproducible.
pub fn simulate(
    library: &ContentLibrary,
    config: &GameConfig,
    policy: Policy,
    games: u32,
) -> GameResult<BalanceReport> {
    let library = primed(library, config)?;

    let mut report = BalanceReport::default();
    for game in 0..games {
        let seed = config.seed.wrapping_add(u64::from(game));
        let mut session =
            GameSession::new(library.clone(), config.clone().with_seed(seed))?;
        let mut picker = StdRng::seed_from_u64(seed.rotate_left(32));

        while !session.state().is_over() {
            let picks = policy.choose(session.state().manpower, &mut picker);
            let round = session.submit(picks)?;
            report.rounds += 1;
            for bucket in round.outcome.resolutions.iter().filter_map(|r| r.bucket) {
                *report.bucket_counts.entry(bucket).or_default() += 1;
            }
            if let Some(rule) = matching_rule(&round.outcome.response_types) {
                *report.synergies.entry(rule.kind).or_default() += 1;
            }
        }

        report.games += 1;
        report.total_final_meter += i64::from(session.state().meter);
        report.record_verdict(session.verdict());
    }
    tracing::debug!(
        %policy,
        games = report.games,
        victories = report.victories,
        defeats = report.defeats,
        "simulation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_policies() {
        assert_eq!(Policy::parse("passive"), Some(Policy::Passive));
        assert_eq!(Policy::parse("FACT_CHECK"), Some(Policy::FactCheck));
        assert_eq!(Policy::parse("random"), Some(Policy::Random));
        assert_eq!(Policy::parse("yolo"), None);
        for policy in Policy::all() {
            assert_eq!(Policy::parse(&policy.to_string()), Some(*policy));
        }
    }

    #[test]
    fn choices_are_affordable() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Policy::Passive.choose(10, &mut rng).is_empty());
        assert_eq!(
            Policy::FactCheck.choose(4, &mut rng),
            vec![Response::thorough(ResponseType::FactCheck)]
        );
        assert_eq!(
            Policy::FactCheck.choose(3, &mut rng),
            vec![Response::basic(ResponseType::FactCheck)]
        );
        assert!(Policy::FactCheck.choose(1, &mut rng).is_empty());
        for manpower in 0..12 {
            let picks = Policy::Random.choose(manpower, &mut rng);
            let cost: u32 = picks.iter().map(|r| r.manpower_cost).sum();
            assert!(cost <= manpower);
        }
    }

    #[test]
    fn passive_batch_tallies_every_round() {
        let library = ContentLibrary::builtin().unwrap();
        let config = GameConfig::default();
        let report = simulate(&library, &config, Policy::Passive, 5).unwrap();
        assert_eq!(report.games, 5);
        assert_eq!(report.rounds, 30);
        assert_eq!(report.victories + report.defeats + report.stalemates, 5);
        assert!(report.synergies.is_empty());
        let rolls: u32 = report.bucket_counts.values().sum();
        assert_eq!(rolls, 30);
    }

    #[test]
    fn simulation_is_reproducible() {
        let library = ContentLibrary::builtin().unwrap();
        let config = GameConfig::default().with_seed(3);
        let a = simulate(&library, &config, Policy::Random, 10).unwrap();
        let b = simulate(&library, &config, Policy::Random, 10).unwrap();
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a.victory_rate()));
        assert!(a.average_final_meter().abs() <= 5.0);
    }

    #[test]
    fn games_share_one_narrative_table() {
        let config = GameConfig::default();
        let library = primed(&ContentLibrary::builtin().unwrap(), &config).unwrap();
        let first = GameSession::new(library.clone(), config.clone()).unwrap();
        let second = GameSession::new(library.clone(), config.with_seed(8)).unwrap();
        assert!(std::ptr::eq(
            first.resolver().registry(),
            second.resolver().registry()
        ));
    }

    #[test]
    fn empty_batch() {
        let library = ContentLibrary::builtin().unwrap();
        let report = simulate(&library, &GameConfig::default(), Policy::Passive, 0).unwrap();
        assert_eq!(report.average_final_meter(), 0.0);
        assert_eq!(report.bucket_rate(Bucket::Success), 0.0);
    }
}
