pub mod counts;
pub mod kmer;

pub use counts::{count, featurize, merge, normalize, profile_sequence, KmerCounts};
pub use kmer::{kmers, Kmers};
