// src/progress.rs
/// Progress reporting for the long-running pipelines (one unit = one team or player).
/// The CLI implements this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit finished.
    fn item_done(&mut self, _label: &str) {}

    /// One unit was skipped or fell back to defaults.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
