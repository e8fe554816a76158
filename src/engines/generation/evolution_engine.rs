use super::fitness::FitnessEvaluator;
use super::individual::{CodonPools, Genome};
use super::operators::{crossover, mutate, random_genome, tournament_selection};
use super::progress::{CancelFlag, GenerationEvent, ProgressCallback};
use crate::config::GenerationConfig;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Why a population run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No qualifying improvement for `max_gens_since_improvement`
    /// consecutive generations.
    Converged,
    /// The optional hard generation cap was hit.
    GenerationLimit,
    /// The cancel flag was observed at a generation boundary.
    Cancelled,
}

/// Best individual of one population run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub sequence: String,
    pub fitness: f64,
    pub generations: usize,
    pub termination: Termination,
}

/// Population-based stochastic search over the synonymous encodings of one
/// protein.
///
/// One run owns its RNG and population; the only state it may share with
/// other runs is the fitness evaluator, whose cache is internally locked.
pub struct EvolutionEngine {
    config: GenerationConfig,
    pools: CodonPools,
    evaluator: Arc<FitnessEvaluator>,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(
        config: GenerationConfig,
        pools: CodonPools,
        evaluator: Arc<FitnessEvaluator>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            pools,
            evaluator,
            rng,
        }
    }

    /// Run the search to a terminal state. The callback is notified at every
    /// generation boundary; the cancel flag is checked there too, so the best
    /// individual so far survives a cancel.
    pub fn run<C: ProgressCallback>(
        &mut self,
        callback: &mut C,
        cancel: &CancelFlag,
    ) -> Result<RunOutcome> {
        let mut population = self.initialize_population();
        let mut best: Option<(Genome, f64)> = None;
        let mut gens_since_improvement = 0usize;
        let mut generation = 0usize;

        let termination = loop {
            callback.on_generation_start(generation);

            let evaluated = self.evaluate_population(&population, callback)?;
            let (gen_best_genome, gen_best_fitness) = evaluated
                .iter()
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(g, f)| (g.clone(), *f))
                .expect("population is never empty");

            // Best-ever tracks any strict improvement (keeps the best
            // monotone under elitism); the stagnation counter resets only on
            // a relative improvement above rel_tol. A best of exactly 0
            // cannot be relatively improved.
            match &best {
                None => best = Some((gen_best_genome, gen_best_fitness)),
                Some((_, best_fitness)) => {
                    let qualifying = *best_fitness > 0.0
                        && gen_best_fitness < *best_fitness
                        && (best_fitness - gen_best_fitness) / best_fitness > self.config.rel_tol;
                    if qualifying {
                        gens_since_improvement = 0;
                    } else {
                        gens_since_improvement += 1;
                    }
                    if gen_best_fitness < *best_fitness {
                        best = Some((gen_best_genome, gen_best_fitness));
                    }
                }
            }
            let best_fitness = best.as_ref().map(|(_, f)| *f).unwrap();

            callback.on_generation_complete(&GenerationEvent {
                iteration: generation,
                best_fitness,
                gens_since_improvement,
            });

            generation += 1;

            if gens_since_improvement >= self.config.max_gens_since_improvement {
                break Termination::Converged;
            }
            if let Some(cap) = self.config.max_generations {
                if generation >= cap {
                    break Termination::GenerationLimit;
                }
            }
            if cancel.is_cancelled() {
                break Termination::Cancelled;
            }

            population = self.create_next_generation(&evaluated);
        };

        let (best_genome, best_fitness) = best.expect("at least one generation was evaluated");
        log::debug!(
            "run stopped after {} generation(s) ({:?}) with fitness {:.6}",
            generation,
            termination,
            best_fitness
        );

        Ok(RunOutcome {
            sequence: self.pools.render(&best_genome),
            fitness: best_fitness,
            generations: generation,
            termination,
        })
    }

    fn initialize_population(&mut self) -> Vec<Genome> {
        (0..self.config.population_size)
            .map(|_| random_genome(&self.pools, &mut self.rng))
            .collect()
    }

    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        population: &[Genome],
        callback: &mut C,
    ) -> Result<Vec<(Genome, f64)>> {
        let mut evaluated = Vec::with_capacity(population.len());
        for (i, genome) in population.iter().enumerate() {
            let fitness = self.evaluator.evaluate(&self.pools.render(genome))?;
            callback.on_individual_evaluated(i + 1, population.len());
            evaluated.push((genome.clone(), fitness));
        }
        Ok(evaluated)
    }

    /// Elitism first, then offspring from tournament parents until the
    /// population is full again. Replacement keeps the size constant.
    fn create_next_generation(&mut self, evaluated: &[(Genome, f64)]) -> Vec<Genome> {
        let mut next_generation = Vec::with_capacity(self.config.population_size);

        let elite = evaluated
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(g, _)| g.clone())
            .expect("population is never empty");
        next_generation.push(elite);

        while next_generation.len() < self.config.population_size {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let parent1 =
                    tournament_selection(evaluated, self.config.tournament_size, &mut self.rng);
                let parent2 =
                    tournament_selection(evaluated, self.config.tournament_size, &mut self.rng);

                let (mut child1, mut child2) = crossover(&parent1, &parent2, &mut self.rng);

                mutate(&mut child1, &self.pools, self.config.mutation_rate, &mut self.rng);
                mutate(&mut child2, &self.pools, self.config.mutation_rate, &mut self.rng);

                next_generation.push(child1);
                if next_generation.len() < self.config.population_size {
                    next_generation.push(child2);
                }
            } else {
                let mut child =
                    tournament_selection(evaluated, self.config.tournament_size, &mut self.rng);
                mutate(&mut child, &self.pools, self.config.mutation_rate, &mut self.rng);
                next_generation.push(child);
            }
        }

        next_generation.truncate(self.config.population_size);
        next_generation
    }
}
