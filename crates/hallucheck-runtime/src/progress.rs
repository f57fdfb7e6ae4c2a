//! Progress notification port for evaluation runs.

use hallucheck_core::ExperimentMode;

/// Receives progress events while items are being evaluated.
///
/// Callbacks arrive from whichever item finishes next, so `completed` grows
/// by one per call but items finish in no particular order.
pub trait ProgressNotifier: Send + Sync {
    /// The run is about to launch `total` items.
    fn on_start(&self, _total: usize, _mode: ExperimentMode) {}

    /// One more item has both its answer and its verdict.
    fn on_item_complete(&self, _completed: usize, _total: usize, _is_hallucination: bool) {}

    /// Every item has finished.
    fn on_finish(&self) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressNotifier for NoProgress {}
