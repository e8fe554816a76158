pub mod genetic_code;

pub use genetic_code::GeneticCode;
