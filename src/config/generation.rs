use super::traits::ConfigSection;
use crate::error::FreqgenError;
use serde::{Deserialize, Serialize};

/// Parameters of the evolutionary search over synonymous encodings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// NCBI genetic code table number. Defaults to the bacterial code.
    pub genetic_code: u8,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    /// Consecutive generations without a qualifying improvement before the
    /// run is declared converged.
    pub max_gens_since_improvement: usize,
    /// Relative fitness improvement required to count as progress.
    pub rel_tol: f64,
    /// Number of independent populations to run; the best individual across
    /// all of them wins.
    pub pop_count: usize,
    /// Memoize fitness by sequence content.
    pub cache: bool,
    /// Share one fitness cache across all populations instead of giving each
    /// run a fresh one.
    pub shared_cache: bool,
    /// Hard cap on generations per population, as a safety net. No cap when
    /// unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_generations: Option<usize>,
    pub tournament_size: usize,
    /// Base RNG seed. Each population run derives its own seed from this;
    /// unset means entropy-seeded, non-reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            genetic_code: 11,
            population_size: 100,
            mutation_rate: 0.3,
            crossover_rate: 0.8,
            max_gens_since_improvement: 50,
            rel_tol: 0.0001,
            pop_count: 1,
            cache: true,
            shared_cache: false,
            max_generations: None,
            tournament_size: 4,
            seed: None,
        }
    }
}

impl ConfigSection for GenerationConfig {
    fn section_name() -> &'static str {
        "generation"
    }

    fn validate(&self) -> Result<(), FreqgenError> {
        if self.population_size == 0 {
            return Err(FreqgenError::Configuration(
                "population_size must be positive".to_string(),
            ));
        }
        if self.pop_count == 0 {
            return Err(FreqgenError::Configuration(
                "pop_count must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(FreqgenError::Configuration(
                "mutation_rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(FreqgenError::Configuration(
                "crossover_rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.rel_tol) {
            return Err(FreqgenError::Configuration(
                "rel_tol must be between 0 and 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(FreqgenError::Configuration(
                "tournament_size must be at least 1".to_string(),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(FreqgenError::Configuration(
                "max_generations must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}
