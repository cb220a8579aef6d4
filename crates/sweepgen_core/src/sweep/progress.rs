use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared progress and cancellation state for a generation run.
///
/// Clones share the same counters, so one handle can be given to the
/// materializer while another is polled or cancelled from elsewhere.
/// Cancellation is only observed between combinations.
#[derive(Debug, Clone)]
pub struct GenerationProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl GenerationProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of configuration files written so far
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Fraction done in `[0, 1]`; zero before a run starts
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    pub(crate) fn start(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Ask the running generation to stop before its next combination
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for GenerationProgress {
    fn default() -> Self {
        Self::new()
    }
}
