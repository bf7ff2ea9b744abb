//! Core logging types: report entries, their status, and the [`Log`] trait.

/// One output file (or skipped manifest) recorded for the run summary.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Path of the file relative to the project root.
    pub name: String,
    /// What happened to it.
    pub status: EntryStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Outcome of a single output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Created (or overwritten) by this run.
    Written,
    /// An existing manifest whose managed region was updated.
    Patched,
    /// Left untouched, e.g. a manifest without its marker region.
    Skipped,
    /// Could not be written.
    Failed,
}

/// Abstraction over logging backends.
///
/// The emitter logs through this trait so tests can pass any implementation.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a file outcome for the summary.
    fn record_entry(&self, name: &str, status: EntryStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_status_equality() {
        assert_eq!(EntryStatus::Written, EntryStatus::Written);
        assert_ne!(EntryStatus::Written, EntryStatus::Patched);
        assert_ne!(EntryStatus::Skipped, EntryStatus::Failed);
    }
}
