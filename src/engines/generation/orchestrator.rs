use super::evolution_engine::{EvolutionEngine, RunOutcome};
use super::fitness::FitnessEvaluator;
use super::individual::CodonPools;
use super::progress::{CancelFlag, GenerationEvent, ProgressCallback};
use crate::config::{ConfigSection, GenerationConfig};
use crate::engines::codon::GeneticCode;
use crate::error::{FreqgenError, Result};
use crate::types::{ProfileSet, RunMetadata, RunResult};
use rayon::prelude::*;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

/// Wires a target-profile document and a protein into `pop_count`
/// independent population runs and keeps the single fittest result.
pub struct Generator {
    config: GenerationConfig,
    code: GeneticCode,
}

impl Generator {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let code = GeneticCode::from_ncbi_id(config.genetic_code)?;
        Ok(Self { config, code })
    }

    pub fn genetic_code(&self) -> &GeneticCode {
        &self.code
    }

    /// Synthesize a DNA sequence encoding `protein` whose usage profiles
    /// are as close as possible to `targets`.
    ///
    /// Progress events from all populations are forwarded to `progress`
    /// when supplied; the cancel flag stops every run at its next
    /// generation boundary.
    pub fn generate(
        &self,
        protein: &str,
        targets: ProfileSet,
        progress: Option<Sender<GenerationEvent>>,
        cancel: &CancelFlag,
    ) -> Result<(RunResult, RunMetadata)> {
        if protein.is_empty() {
            return Err(FreqgenError::InvalidInput(
                "amino acid sequence is empty".to_string(),
            ));
        }
        if targets.is_empty() {
            return Err(FreqgenError::NoTargetSpecified);
        }
        // Bad target keys and unencodable residues must surface before any
        // optimizer work begins, not from inside the first evaluation.
        if targets.keys().any(|key| key.k() == 0) {
            return Err(FreqgenError::InvalidInput(
                "target profile keyed by k = 0; k-mer lengths must be at least 1".to_string(),
            ));
        }
        let pools = CodonPools::new(protein, &self.code)?;

        let started = Instant::now();

        let shared_evaluator = self
            .config
            .shared_cache
            .then(|| Arc::new(FitnessEvaluator::new(targets.clone(), self.config.cache)));

        // The sender is cloned up front so the parallel runs move their own
        // handles instead of sharing one across threads.
        let runs: Vec<(usize, Option<Sender<GenerationEvent>>)> = (0..self.config.pop_count)
            .map(|run| (run, progress.clone()))
            .collect();

        let run_one = |run: usize, sender: Option<Sender<GenerationEvent>>| -> Result<RunOutcome> {
            let evaluator = match &shared_evaluator {
                Some(evaluator) => Arc::clone(evaluator),
                None => Arc::new(FitnessEvaluator::new(targets.clone(), self.config.cache)),
            };
            let seed = self.config.seed.map(|s| s.wrapping_add(run as u64));
            let mut engine =
                EvolutionEngine::new(self.config.clone(), pools.clone(), evaluator, seed);
            let mut callback = ForwardingProgress { sender };
            engine.run(&mut callback, cancel)
        };

        let outcomes: Vec<RunOutcome> = if self.config.pop_count > 1 {
            runs.into_par_iter()
                .map(|(run, sender)| run_one(run, sender))
                .collect::<Result<_>>()?
        } else {
            runs.into_iter()
                .map(|(run, sender)| run_one(run, sender))
                .collect::<Result<_>>()?
        };

        let best = outcomes
            .into_iter()
            .min_by(|a, b| a.fitness.total_cmp(&b.fitness))
            .expect("pop_count is validated positive");
        log::info!(
            "{} population run(s) finished, best fitness {:.6}",
            self.config.pop_count,
            best.fitness
        );

        let metadata = RunMetadata {
            fitness: best.fitness,
            duration_milliseconds: started.elapsed().as_millis(),
            mutation_rate: self.config.mutation_rate,
            crossover_rate: self.config.crossover_rate,
            population_size: self.config.population_size,
            population_count: self.config.pop_count,
            early_stopping: self.config.max_gens_since_improvement,
            rel_tol: self.config.rel_tol,
        };
        let result = RunResult {
            sequence: best.sequence,
            fitness: best.fitness,
        };
        Ok((result, metadata))
    }

    /// Convenience entry point for DNA input: translate under the run's
    /// genetic code first, then optimize the resulting protein.
    pub fn generate_from_dna(
        &self,
        dna: &str,
        targets: ProfileSet,
        progress: Option<Sender<GenerationEvent>>,
        cancel: &CancelFlag,
    ) -> Result<(RunResult, RunMetadata)> {
        let protein = self.code.translate(dna)?;
        self.generate(&protein, targets, progress, cancel)
    }
}

/// Per-run callback that forwards generation events to one shared channel.
struct ForwardingProgress {
    sender: Option<Sender<GenerationEvent>>,
}

impl ProgressCallback for ForwardingProgress {
    fn on_generation_complete(&mut self, event: &GenerationEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(*event);
        }
    }
}
