pub mod evolution_engine;
pub mod fitness;
pub mod individual;
pub mod operators;
pub mod orchestrator;
pub mod progress;

pub use evolution_engine::{EvolutionEngine, RunOutcome, Termination};
pub use fitness::FitnessEvaluator;
pub use individual::{CodonPools, Genome};
pub use orchestrator::Generator;
pub use progress::{
    CancelFlag, ChannelProgress, GenerationEvent, LogProgress, NoopProgress, ProgressCallback,
};
