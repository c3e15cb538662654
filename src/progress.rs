// src/progress.rs
/// Lightweight progress reporting used by long-running scrapes.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of entity ids.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One entity finished; `records` is how many it produced.
    fn item_done(&mut self, _id: &str, _records: usize) {}

    /// One entity failed; the scrape continues with the others.
    fn item_failed(&mut self, _id: &str, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
