//! The resolution entry point.
//!
//! Per response: adjust probabilities, roll a bucket, narrate it. Then
//! check the whole selection for synergy and aggregate. Draw order for each
//! response is variance, primary, critical, narrative pick; a response
//! whose scenario table is missing draws nothing.

use std::sync::Arc;

use crate::aggregate::{Outcome, ResponseResolution, aggregate};
use crate::config::EngineConfig;
use crate::content::{ContentRegistry, NarrativeEntry};
use crate::narrative::{UNKNOWN_RESPONSE_TEXT, select};
use crate::probability::adjust;
use crate::random::RandomSource;
use crate::response::{GameSnapshot, Response, ResponseType};
use crate::roll::roll;
use crate::scenario::Scenario;
use crate::synergy::evaluate;

/// Resolve one round.
///
/// Never fails: gaps in the content produce zero-shift fallback narration
/// and a logged diagnostic. Affordability of `responses` is not checked.
pub fn resolve(
    scenario: &Scenario,
    responses: &[Response],
    snapshot: &GameSnapshot,
    registry: &ContentRegistry,
    config: &EngineConfig,
    source: &mut dyn RandomSource,
) -> Outcome {
    let resolutions: Vec<ResponseResolution> = responses
        .iter()
        .map(|response| resolve_response(scenario, response, snapshot, registry, config, source))
        .collect();

    let types: Vec<ResponseType> = responses.iter().map(|r| r.kind).collect();
    let synergy = evaluate(&types, registry);

    aggregate(resolutions, synergy, responses, config.meter_shift_bound)
}

fn resolve_response(
    scenario: &Scenario,
    response: &Response,
    snapshot: &GameSnapshot,
    registry: &ContentRegistry,
    config: &EngineConfig,
    source: &mut dyn RandomSource,
) -> ResponseResolution {
    let Some(table) = scenario.probabilities_for(response.kind) else {
        tracing::error!(
            scenario = %scenario.id,
            response_type = response.kind.key(),
            "no probabilities found for response type"
        );
        return ResponseResolution {
            response_type: response.kind,
            probabilities: None,
            bucket: None,
            entry: NarrativeEntry::new(UNKNOWN_RESPONSE_TEXT, 0),
        };
    };

    let probabilities = adjust(
        table,
        response,
        scenario.theme(),
        &snapshot.pre_bunks_used,
        config,
        source,
    );
    let bucket = roll(&probabilities, config, source);
    let entry = select(registry, response.kind, bucket, source);

    ResponseResolution {
        response_type: response.kind,
        probabilities: Some(probabilities),
        bucket: Some(bucket),
        entry,
    }
}

/// A stateless resolver bound to one content pack and configuration.
///
/// Cheap to clone and safe to share between threads, e.g. for batch
/// balance simulations.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<ContentRegistry>,
    config: EngineConfig,
}

impl Resolver {
    /// Create a resolver.
    pub fn new(registry: Arc<ContentRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// The content pack in use.
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve one round with the given random source.
    pub fn resolve(
        &self,
        scenario: &Scenario,
        responses: &[Response],
        snapshot: &GameSnapshot,
        source: &mut dyn RandomSource,
    ) -> Outcome {
        resolve(scenario, responses, snapshot, &self.registry, &self.config, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::FALLBACK_TEXT;
    use crate::random::ScriptedSource;
    use crate::roll::Bucket;
    use crate::scenario::ProbabilityTable;
    use crate::synergy::SynergyKind;

    fn registry() -> ContentRegistry {
        let mut registry = ContentRegistry::new(
            NarrativeEntry::new("The rebuttal goes viral.", 3),
            NarrativeEntry::new("The response becomes the story.", -3),
        );
        for kind in ResponseType::all() {
            registry = registry
                .with_entries(*kind, Bucket::Success, [NarrativeEntry::new(format!("{kind} works."), 2)])
                .with_entries(*kind, Bucket::Neutral, [NarrativeEntry::new(format!("{kind} stalls."), 0)])
                .with_entries(*kind, Bucket::Failure, [NarrativeEntry::new(format!("{kind} backfires."), -2)]);
        }
        SynergyKind::all()
            .iter()
            .fold(registry, |r, k| r.with_synergy_text(*k, k.to_string()))
    }

    fn scenario() -> Scenario {
        ResponseType::all()
            .iter()
            .fold(Scenario::new("test", "An inject.", Some("theme-x")), |s, kind| {
                s.with_probabilities(
                    *kind,
                    ProbabilityTable::new(0.6, 0.3, 0.1).with_thorough_bonus(0.1),
                )
            })
            .with_probabilities(ResponseType::Ignore, ProbabilityTable::new(0.0, 1.0, 0.0))
    }

    fn run(responses: &[Response], draws: &[f64]) -> Outcome {
        let mut source = ScriptedSource::new(draws.iter().copied());
        resolve(
            &scenario(),
            responses,
            &GameSnapshot::default(),
            &registry(),
            &EngineConfig::default(),
            &mut source,
        )
    }

    #[test]
    fn forced_draw_neutral_and_failure() {
        // variance 0.5 -> no swing
        let neutral = run(&[Response::basic(ResponseType::CounterNarrative)], &[0.5, 0.65, 0.9, 0.0]);
        assert_eq!(neutral.resolutions[0].bucket, Some(Bucket::Neutral));
        assert_eq!(neutral.meter_shift, 0);

        let failure = run(&[Response::basic(ResponseType::CounterNarrative)], &[0.5, 0.95, 0.9, 0.0]);
        assert_eq!(failure.resolutions[0].bucket, Some(Bucket::Failure));
        assert_eq!(failure.meter_shift, -2);
        assert!(!failure.success);
    }

    #[test]
    fn ignore_always_neutral_without_swing() {
        for r in [0.0, 0.3, 0.7, 0.999] {
            for variance in [0.0, 0.5, 0.999] {
                let mut source = ScriptedSource::new([variance, r, 0.0, 0.0]);
                let outcome = resolve(
                    &scenario(),
                    &[Response::basic(ResponseType::Ignore)],
                    &GameSnapshot::default(),
                    &registry(),
                    &EngineConfig::deterministic(),
                    &mut source,
                );
                assert_eq!(outcome.resolutions[0].bucket, Some(Bucket::Neutral), "r={r} v={variance}");
                assert_eq!(outcome.meter_shift, 0);
                assert_eq!(outcome.outcomes[0].text, "Ignore stalls.");
            }
        }
    }

    #[test]
    fn critical_replaces_type_narrative() {
        let outcome = run(&[Response::basic(ResponseType::FactCheck)], &[0.5, 0.0, 0.01, 0.0]);
        assert_eq!(outcome.resolutions[0].bucket, Some(Bucket::CriticalSuccess));
        assert_eq!(outcome.outcomes[0].text, "The rebuttal goes viral.");
        assert_eq!(outcome.meter_shift, 3);
    }

    #[test]
    fn pre_bunk_and_fact_check_append_synergy_last() {
        let pair = [
            Response::basic(ResponseType::PreBunk),
            Response::basic(ResponseType::FactCheck),
        ];
        for (r1, r2) in [(0.0, 0.0), (0.95, 0.95), (0.65, 0.0)] {
            let outcome = run(&pair, &[0.5, r1, 0.9, 0.0, 0.5, r2, 0.9, 0.0]);
            assert_eq!(outcome.outcomes.len(), 3);
            let synergy = outcome.synergy().unwrap();
            assert_eq!(synergy.shift, 1);
            assert_eq!(synergy.text, "Pre-Bunk + Fact-Check");
        }
    }

    #[test]
    fn two_fact_checks_penalised_once() {
        let pair = [
            Response::basic(ResponseType::FactCheck),
            Response::basic(ResponseType::FactCheck),
        ];
        let outcome = run(&pair, &[0.5, 0.65, 0.9, 0.0]);
        assert_eq!(outcome.outcomes.len(), 3);
        assert_eq!(outcome.synergy().map(|s| s.shift), Some(-1));
        assert_eq!(outcome.meter_shift, -1);
    }

    #[test]
    fn missing_table_is_non_fatal() {
        let mut scenario = scenario();
        scenario.probabilities.remove(&ResponseType::DiscreditSource);
        let mut source = ScriptedSource::new([0.5, 0.0, 0.9, 0.0]);
        let outcome = resolve(
            &scenario,
            &[
                Response::basic(ResponseType::DiscreditSource),
                Response::basic(ResponseType::CounterNarrative),
            ],
            &GameSnapshot::default(),
            &registry(),
            &EngineConfig::default(),
            &mut source,
        );
        assert_eq!(outcome.resolutions[0].bucket, None);
        assert_eq!(outcome.outcomes[0].text, UNKNOWN_RESPONSE_TEXT);
        assert_eq!(outcome.outcomes[0].shift, 0);
        assert_eq!(outcome.resolutions[1].bucket, Some(Bucket::Success));
        assert_eq!(outcome.meter_shift, 2);
        assert_eq!(outcome.manpower_cost, 5);
        assert_eq!(source.drawn(), 4);
    }

    #[test]
    fn missing_narrative_falls_back() {
        let sparse = ContentRegistry::new(NarrativeEntry::new("w", 3), NarrativeEntry::new("l", -3));
        let mut source = ScriptedSource::new([0.5, 0.0, 0.9]);
        let outcome = resolve(
            &scenario(),
            &[Response::basic(ResponseType::PreBunk)],
            &GameSnapshot::default(),
            &sparse,
            &EngineConfig::default(),
            &mut source,
        );
        assert_eq!(outcome.outcomes[0].text, FALLBACK_TEXT);
        assert_eq!(outcome.meter_shift, 0);
    }

    #[test]
    fn pre_bunked_theme_raises_success() {
        let mut snapshot = GameSnapshot::default();
        snapshot.pre_bunks_used.insert("theme-x".to_string());
        let mut source = ScriptedSource::new([0.5, 0.7, 0.9, 0.0]);
        let outcome = resolve(
            &scenario(),
            &[Response::basic(ResponseType::PreBunk)],
            &snapshot,
            &registry(),
            &EngineConfig::default(),
            &mut source,
        );
        // 0.8 / 0.3 / 0.0 renormalised over 1.1
        let p = outcome.resolutions[0].probabilities.unwrap();
        assert!((p.success - 0.8 / 1.1).abs() < 1e-9);
        assert_eq!(outcome.resolutions[0].bucket, Some(Bucket::Success));
    }

    #[test]
    fn resolver_matches_free_function() {
        let resolver = Resolver::new(Arc::new(registry()), EngineConfig::default());
        let draws = [0.2, 0.4, 0.6, 0.8];
        let mut a = ScriptedSource::new(draws);
        let mut b = ScriptedSource::new(draws);
        let responses = [Response::thorough(ResponseType::FactCheck)];
        let via_resolver = resolver.resolve(&scenario(), &responses, &GameSnapshot::default(), &mut a);
        let direct = resolve(
            &scenario(),
            &responses,
            &GameSnapshot::default(),
            resolver.registry(),
            resolver.config(),
            &mut b,
        );
        assert_eq!(via_resolver, direct);
    }

    #[test]
    fn resolver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver>();
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        fn any_response() -> impl Strategy<Value = Response> {
            (0usize..5, 0u32..6).prop_map(|(i, cost)| Response::new(ResponseType::all()[i], cost))
        }

        fn any_table() -> impl Strategy<Value = ProbabilityTable> {
            (0.0f64..2.0, 0.0f64..2.0, 0.0f64..2.0, 0.0f64..1.0)
                .prop_map(|(s, n, f, b)| ProbabilityTable::new(s, n, f).with_thorough_bonus(b))
        }

        proptest! {
            #[test]
            fn adjusted_probabilities_sum_to_one(
                table in any_table(),
                response in any_response(),
                pre_bunked in any::<bool>(),
                seed in any::<u64>(),
            ) {
                let mut used = std::collections::BTreeSet::new();
                if pre_bunked {
                    used.insert("theme-x".to_string());
                }
                let mut rng = StdRng::seed_from_u64(seed);
                let p = adjust(&table, &response, Some("theme-x"), &used, &EngineConfig::default(), &mut rng);
                prop_assert!((p.total() - 1.0).abs() < 1e-9);
                prop_assert!(p.success >= 0.0 && p.neutral >= 0.0 && p.failure >= 0.0);
            }

            #[test]
            fn outcome_is_bounded_and_cost_is_literal(
                responses in proptest::collection::vec(any_response(), 0..8),
                seed in any::<u64>(),
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let outcome = resolve(
                    &scenario(),
                    &responses,
                    &GameSnapshot::default(),
                    &registry(),
                    &EngineConfig::default(),
                    &mut rng,
                );
                prop_assert!((-5..=5).contains(&outcome.meter_shift));
                let expected: u32 = responses.iter().map(|r| r.manpower_cost).sum();
                prop_assert_eq!(outcome.manpower_cost, expected);
                prop_assert_eq!(outcome.resolutions.len(), responses.len());
                prop_assert_eq!(outcome.success, outcome.meter_shift > 0);
            }
        }
    }
}
