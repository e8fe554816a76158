//! Genome representation for the synonymous-encoding search.
//!
//! A genome is one gene per protein position, where gene `i` is an index
//! into the synonym pool of amino acid `i`. Every genome over the pools
//! therefore renders to a DNA sequence that translates back to exactly the
//! target protein: crossover and mutation operate on synonym choices and can
//! never change the encoded protein, so no post-hoc rejection is needed.

use crate::engines::codon::GeneticCode;
use crate::error::Result;

pub type Genome = Vec<u16>;

/// The synonym pool for every position of a fixed protein, resolved once per
/// run from the active genetic code.
#[derive(Debug, Clone)]
pub struct CodonPools {
    pools: Vec<Vec<String>>,
}

impl CodonPools {
    /// Resolve the pools for `protein`. Fails if any residue has no codon
    /// under `code`, so the search never starts from an unencodable input.
    pub fn new(protein: &str, code: &GeneticCode) -> Result<Self> {
        let pools = protein
            .chars()
            .map(|aa| code.synonyms(aa).map(<[String]>::to_vec))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { pools })
    }

    /// Number of protein positions.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Synonym count at a position.
    pub fn pool_size(&self, position: usize) -> usize {
        self.pools[position].len()
    }

    /// Concatenate the chosen codons into a DNA sequence.
    pub fn render(&self, genome: &Genome) -> String {
        debug_assert_eq!(genome.len(), self.pools.len());
        let mut seq = String::with_capacity(self.pools.len() * 3);
        for (pool, &choice) in self.pools.iter().zip(genome) {
            seq.push_str(&pool[choice as usize]);
        }
        seq
    }
}
