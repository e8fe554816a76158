use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Snapshot emitted after every generation. Purely informational; the
/// search never reads it back.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationEvent {
    pub iteration: usize,
    pub best_fitness: f64,
    pub gens_since_improvement: usize,
}

/// Observer for a running population. The engine only notifies; a no-op
/// implementation is always sufficient.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _event: &GenerationEvent) {}
    fn on_individual_evaluated(&mut self, _evaluated: usize, _total: usize) {}
}

/// Discards all progress events.
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {}

/// Reports progress through the `log` crate.
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_generation_complete(&mut self, event: &GenerationEvent) {
        log::info!(
            "generation {}: best fitness {:.6}, {} gen(s) since improvement",
            event.iteration,
            event.best_fitness,
            event.gens_since_improvement
        );
    }
}

/// Forwards events over an mpsc channel, e.g. to a spinner or UI thread.
/// Send failures are ignored; a dropped receiver must not stop the run.
pub struct ChannelProgress {
    sender: Sender<GenerationEvent>,
}

impl ChannelProgress {
    pub fn new(sender: Sender<GenerationEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgress {
    fn on_generation_complete(&mut self, event: &GenerationEvent) {
        let _ = self.sender.send(*event);
    }
}

/// Cooperative cancellation handle. The engine checks it at generation
/// boundaries only, so the best individual so far is always retrievable
/// after a cancel.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
