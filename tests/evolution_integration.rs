use freqgen::engines::generation::{
    CancelFlag, CodonPools, EvolutionEngine, FitnessEvaluator, GenerationEvent, LogProgress,
    NoopProgress, ProgressCallback, Termination,
};
use freqgen::{GeneticCode, GenerationConfig, ProfileKey, ProfileSet};
use std::collections::HashMap;
use std::sync::Arc;

/// Callback that records every generation event for later assertions.
struct RecordingProgress {
    events: Vec<GenerationEvent>,
}

impl ProgressCallback for RecordingProgress {
    fn on_generation_complete(&mut self, event: &GenerationEvent) {
        self.events.push(*event);
    }
}

fn targets(key: ProfileKey, entries: &[(&str, f64)]) -> ProfileSet {
    let profile: HashMap<String, f64> = entries
        .iter()
        .map(|(kmer, freq)| (kmer.to_string(), *freq))
        .collect();
    let mut targets = ProfileSet::new();
    targets.insert(key, profile);
    targets
}

fn engine_for(
    protein: &str,
    targets: ProfileSet,
    config: GenerationConfig,
    seed: u64,
) -> EvolutionEngine {
    let code = GeneticCode::from_ncbi_id(config.genetic_code).unwrap();
    let pools = CodonPools::new(protein, &code).unwrap();
    let evaluator = Arc::new(FitnessEvaluator::new(targets, config.cache));
    EvolutionEngine::new(config, pools, evaluator, Some(seed))
}

#[test]
fn kf_scenario_reaches_the_exact_match() {
    let _ = env_logger::builder().is_test(true).try_init();

    // K -> {AAA, AAG}, F -> {TTT, TTC}: four genotypes, one perfect match.
    let targets = targets(ProfileKey::K(3), &[("AAA", 0.5), ("TTT", 0.5)]);
    let config = GenerationConfig {
        population_size: 20,
        max_gens_since_improvement: 10,
        ..Default::default()
    };
    let mut engine = engine_for("KF", targets, config, 42);

    let outcome = engine
        .run(&mut NoopProgress, &CancelFlag::new())
        .unwrap();

    assert_eq!(outcome.fitness, 0.0);
    assert_eq!(outcome.sequence, "AAATTT");
    assert_eq!(outcome.termination, Termination::Converged);
}

#[test]
fn produced_sequence_always_translates_to_the_protein() {
    let protein = "MKFLWQED";
    let targets = targets(ProfileKey::Codons, &[("AAA", 1.0)]);
    let config = GenerationConfig {
        population_size: 10,
        max_gens_since_improvement: 5,
        ..Default::default()
    };
    let code = GeneticCode::default();

    for seed in 0..5 {
        let mut engine = engine_for(protein, targets.clone(), config.clone(), seed);
        let outcome = engine.run(&mut LogProgress, &CancelFlag::new()).unwrap();
        assert_eq!(code.translate(&outcome.sequence).unwrap(), protein);
    }
}

#[test]
fn best_fitness_is_monotone_non_worsening() {
    let targets = targets(
        ProfileKey::Codons,
        &[("AAA", 0.25), ("TTT", 0.25), ("CTG", 0.25), ("GAA", 0.25)],
    );
    let config = GenerationConfig {
        population_size: 15,
        max_gens_since_improvement: 8,
        max_generations: Some(60),
        ..Default::default()
    };
    let mut engine = engine_for("KKFFLLEE", targets, config, 7);

    let mut progress = RecordingProgress { events: Vec::new() };
    engine.run(&mut progress, &CancelFlag::new()).unwrap();

    assert!(!progress.events.is_empty());
    for pair in progress.events.windows(2) {
        assert!(
            pair[1].best_fitness <= pair[0].best_fitness,
            "best fitness worsened from {} to {}",
            pair[0].best_fitness,
            pair[1].best_fitness
        );
    }
}

#[test]
fn early_stopping_fires_after_exactly_the_configured_stagnation() {
    // M and W have a single codon each, so the landscape is a single point
    // and no generation can ever improve on generation 0.
    let targets = targets(ProfileKey::Codons, &[("AAA", 1.0)]);
    let config = GenerationConfig {
        population_size: 8,
        max_gens_since_improvement: 5,
        ..Default::default()
    };
    let mut engine = engine_for("MW", targets, config, 3);

    let mut progress = RecordingProgress { events: Vec::new() };
    let outcome = engine.run(&mut progress, &CancelFlag::new()).unwrap();

    assert_eq!(outcome.termination, Termination::Converged);
    // Generation 0 establishes the best; generations 1..=5 stagnate.
    assert_eq!(outcome.generations, 6);
    assert_eq!(progress.events.len(), 6);
    let counters: Vec<usize> = progress
        .events
        .iter()
        .map(|e| e.gens_since_improvement)
        .collect();
    assert_eq!(counters, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn generation_cap_is_a_hard_stop() {
    let targets = targets(ProfileKey::K(3), &[("AAA", 0.5), ("TTT", 0.5)]);
    let config = GenerationConfig {
        population_size: 10,
        max_gens_since_improvement: 1_000,
        max_generations: Some(3),
        ..Default::default()
    };
    let mut engine = engine_for("KF", targets, config, 9);

    let mut progress = RecordingProgress { events: Vec::new() };
    let outcome = engine.run(&mut progress, &CancelFlag::new()).unwrap();

    assert_eq!(outcome.termination, Termination::GenerationLimit);
    assert_eq!(outcome.generations, 3);
    assert_eq!(progress.events.len(), 3);
}

#[test]
fn cancel_between_generations_keeps_the_best_so_far() {
    let targets = targets(ProfileKey::K(3), &[("AAA", 0.5), ("TTT", 0.5)]);
    let config = GenerationConfig {
        population_size: 10,
        max_gens_since_improvement: 1_000,
        ..Default::default()
    };
    let mut engine = engine_for("KF", targets, config, 5);

    let cancel = CancelFlag::new();
    cancel.cancel();
    let outcome = engine.run(&mut NoopProgress, &cancel).unwrap();

    assert_eq!(outcome.termination, Termination::Cancelled);
    assert_eq!(outcome.generations, 1);
    assert!(outcome.fitness.is_finite());
    assert_eq!(
        GeneticCode::default().translate(&outcome.sequence).unwrap(),
        "KF"
    );
}

#[test]
fn caching_does_not_change_the_search_result() {
    let targets = targets(ProfileKey::K(3), &[("AAA", 0.5), ("TTT", 0.5)]);
    let run = |cache: bool| {
        let config = GenerationConfig {
            population_size: 12,
            max_gens_since_improvement: 6,
            cache,
            ..Default::default()
        };
        let mut engine = engine_for("KFK", targets.clone(), config, 21);
        engine.run(&mut NoopProgress, &CancelFlag::new()).unwrap()
    };

    let with_cache = run(true);
    let without_cache = run(false);
    // Same seed, same stochastic path: the cache may only speed things up.
    assert_eq!(with_cache.sequence, without_cache.sequence);
    assert_eq!(with_cache.fitness, without_cache.fitness);
    assert_eq!(with_cache.generations, without_cache.generations);
}
