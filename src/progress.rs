// src/progress.rs
/// Lightweight progress reporting for long runs. The CLI implements this to
/// print status; library callers can pass `None` or `NullProgress`.
pub trait Progress {
    /// Called at the start of an event with the number of games (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one game has been parsed (successfully or not), by index.
    fn item_done(&mut self, _index: usize) {}

    /// Called at the end of the event, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
