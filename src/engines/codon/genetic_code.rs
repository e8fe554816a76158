//! Codon translation tables and synonymous-codon lookup.
//!
//! Codons are packed into an index in [0, 64) with A=0, C=1, G=2, T=3,
//! so each NCBI table is a flat 64-entry amino-acid array in lexicographic
//! codon order (AAA, AAC, AAG, AAT, ACA, ...).

use crate::error::{FreqgenError, Result};
use std::collections::HashMap;

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

fn codon_index(codon: &[u8]) -> Option<usize> {
    if codon.len() != 3 {
        return None;
    }
    let b1 = base_index(codon[0])?;
    let b2 = base_index(codon[1])?;
    let b3 = base_index(codon[2])?;
    Some(b1 * 16 + b2 * 4 + b3)
}

fn index_to_codon(idx: usize) -> String {
    let bytes = [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]];
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Standard code (NCBI table 1). Table 11 (bacterial/plant plastid) shares
/// this amino-acid assignment and differs only in start codons, which do not
/// matter here.
const TABLE1_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// Vertebrate mitochondrial (NCBI table 2): TGA=Trp, AGA/AGG=Stop, ATA=Met.
const TABLE2_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'*', b'S', b'*', b'S',
    b'M', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'W', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// Mycoplasma/Spiroplasma (NCBI table 4): TGA=Trp.
const TABLE4_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'W', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// Invertebrate mitochondrial (NCBI table 5): AGA/AGG=Ser, ATA=Met, TGA=Trp.
const TABLE5_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'S', b'S', b'S', b'S',
    b'M', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'W', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// A codon-to-amino-acid table plus its inverse (amino acid to synonymous
/// codons), built once and shared read-only for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    id: u8,
    table: [u8; 64],
    synonyms: HashMap<char, Vec<String>>,
}

impl GeneticCode {
    /// Build the table for an NCBI genetic code number. Supported tables:
    /// 1, 2, 4, 5 and 11.
    pub fn from_ncbi_id(id: u8) -> Result<Self> {
        let table = match id {
            1 | 11 => TABLE1_AA,
            2 => TABLE2_AA,
            4 => TABLE4_AA,
            5 => TABLE5_AA,
            _ => {
                return Err(FreqgenError::Configuration(format!(
                    "unsupported NCBI genetic code table: {}",
                    id
                )))
            }
        };

        let mut synonyms: HashMap<char, Vec<String>> = HashMap::new();
        for (idx, &aa) in table.iter().enumerate() {
            synonyms
                .entry(aa as char)
                .or_default()
                .push(index_to_codon(idx));
        }

        Ok(Self { id, table, synonyms })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    /// Translate a DNA sequence codon by codon from frame 0.
    pub fn translate(&self, dna: &str) -> Result<String> {
        if dna.len() % 3 != 0 {
            return Err(FreqgenError::InvalidCodon(format!(
                "sequence length {} is not a multiple of 3",
                dna.len()
            )));
        }
        let mut protein = String::with_capacity(dna.len() / 3);
        for codon in dna.as_bytes().chunks(3) {
            let idx = codon_index(codon).ok_or_else(|| {
                FreqgenError::InvalidCodon(format!(
                    "unrecognized codon {:?}",
                    String::from_utf8_lossy(codon)
                ))
            })?;
            protein.push(self.table[idx] as char);
        }
        Ok(protein)
    }

    /// All codons encoding the given amino acid (or `*` for stop).
    /// Non-empty for every residue the table can encode.
    pub fn synonyms(&self, amino_acid: char) -> Result<&[String]> {
        self.synonyms
            .get(&amino_acid.to_ascii_uppercase())
            .map(Vec::as_slice)
            .ok_or_else(|| {
                FreqgenError::InvalidInput(format!(
                    "amino acid {:?} cannot be encoded under genetic code {}",
                    amino_acid, self.id
                ))
            })
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        // Table 11 is always present.
        Self::from_ncbi_id(11).unwrap()
    }
}
