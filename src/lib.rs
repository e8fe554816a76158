//! Generate DNA sequences that encode a fixed amino-acid sequence while
//! mimicking a target k-mer and codon usage profile.
//!
//! Two paths through the crate:
//! - featurization: nucleotide sequences in, normalized k-mer/codon usage
//!   profiles out ([`engines::featurize::featurize`]);
//! - generation: a protein plus a target profile document in, the fittest
//!   synonymous DNA encoding out
//!   ([`engines::generation::Generator::generate`]).
//!
//! File parsing and serialization stay outside the crate; the boundary
//! types in [`types`] carry serde impls so callers can do both.

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager, FeaturizeConfig, GenerationConfig};
pub use engines::codon::GeneticCode;
pub use engines::featurize::featurize;
pub use engines::generation::{CancelFlag, GenerationEvent, Generator, ProgressCallback};
pub use error::{FreqgenError, Result};
pub use types::{FrequencyProfile, ProfileKey, ProfileSet, RunMetadata, RunResult};
