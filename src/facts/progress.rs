/// A trait for reporting progress of a monitoring run.
pub trait Progress: Send + Sync {
    /// Start a phase covering `total` units of work.
    fn start(&self, phase: &str, total: u64);

    /// Record that one unit of work finished.
    fn advance(&self, label: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _phase: &str, _total: u64) {}

    fn advance(&self, _label: &str) {}

    fn done(&self) {}
}
