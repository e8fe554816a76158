use super::individual::{CodonPools, Genome};
use rand::Rng;

/// Uniform random synonym choice at every position.
pub fn random_genome<R: Rng>(pools: &CodonPools, rng: &mut R) -> Genome {
    (0..pools.len())
        .map(|i| rng.gen_range(0..pools.pool_size(i)) as u16)
        .collect()
}

/// Tournament selection: best (lowest fitness) of K random candidates.
pub fn tournament_selection<R: Rng>(
    population: &[(Genome, f64)],
    tournament_size: usize,
    rng: &mut R,
) -> Genome {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].1;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].1 < best_fitness {
            best_idx = idx;
            best_fitness = population[idx].1;
        }
    }

    population[best_idx].0.clone()
}

/// Single-point crossover. Genes are whole-codon choices, so any cut point
/// is a codon boundary and both children still encode the parent protein.
pub fn crossover<R: Rng>(parent1: &Genome, parent2: &Genome, rng: &mut R) -> (Genome, Genome) {
    let len = parent1.len().min(parent2.len());
    if len <= 1 {
        return (parent1.clone(), parent2.clone());
    }

    let point = rng.gen_range(1..len);

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    child1[point..].copy_from_slice(&parent2[point..]);
    child2[point..].copy_from_slice(&parent1[point..]);

    (child1, child2)
}

/// Per-codon mutation: with probability `mutation_rate`, re-pick a
/// *different* synonym for that position. Positions with a single synonym
/// (e.g. Met, Trp under the standard code) are left alone.
pub fn mutate<R: Rng>(genome: &mut Genome, pools: &CodonPools, mutation_rate: f64, rng: &mut R) {
    for (i, gene) in genome.iter_mut().enumerate() {
        let size = pools.pool_size(i);
        if size > 1 && rng.gen::<f64>() < mutation_rate {
            // Sample from the pool minus the current choice.
            let mut choice = rng.gen_range(0..size - 1) as u16;
            if choice >= *gene {
                choice += 1;
            }
            *gene = choice;
        }
    }
}
