pub mod codon;
pub mod featurize;
pub mod generation;
