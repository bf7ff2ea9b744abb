//! Run state machine and the end-of-run report.
use std::fmt;
use std::path::PathBuf;

use crate::error::{FileWriteError, ManifestPatchError};
use crate::profiles::TargetKey;

/// Lifecycle of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// Nothing has happened yet.
    #[default]
    Initialized,
    /// The target key resolved to a profile.
    TargetResolved,
    /// Source documents were found and read.
    Discovered,
    /// Every document has an emission plan.
    Planned,
    /// No two plans share a destination.
    CollisionChecked,
    /// Documents were written.
    Written,
    /// Assets and manifests are done; the run succeeded.
    Finalized,
    /// The run stopped or completed with errors.
    Failed(String),
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialized => f.write_str("initialized"),
            Self::TargetResolved => f.write_str("target resolved"),
            Self::Discovered => f.write_str("discovered"),
            Self::Planned => f.write_str("planned"),
            Self::CollisionChecked => f.write_str("collision checked"),
            Self::Written => f.write_str("written"),
            Self::Finalized => f.write_str("finalized"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct EmissionReport {
    /// Resolved target.
    pub target: TargetKey,
    /// Project root all destinations are relative to.
    pub output_root: PathBuf,
    /// Pages written.
    pub pages: usize,
    /// Partials written.
    pub partials: usize,
    /// Manifests created.
    pub manifests_written: usize,
    /// Existing manifests patched.
    pub manifests_patched: usize,
    /// Asset files copied.
    pub assets_copied: usize,
    /// Every document and manifest written, relative to `output_root`.
    pub written: Vec<PathBuf>,
    /// Manifests left untouched.
    pub skipped: Vec<ManifestPatchError>,
    /// Files that could not be written.
    pub failed: Vec<FileWriteError>,
    /// Final state.
    pub state: RunState,
}

impl EmissionReport {
    pub(super) const fn new(target: TargetKey, output_root: PathBuf) -> Self {
        Self {
            target,
            output_root,
            pages: 0,
            partials: 0,
            manifests_written: 0,
            manifests_patched: 0,
            assets_copied: 0,
            written: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            state: RunState::Initialized,
        }
    }

    /// Whether every file was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_state_keeps_reason() {
        let state = RunState::Failed("2 file(s) could not be written".to_string());
        assert_eq!(state.to_string(), "failed: 2 file(s) could not be written");
    }

    #[test]
    fn new_report_is_empty_and_complete() {
        let report = EmissionReport::new(TargetKey::Django, PathBuf::from("out/shop"));
        assert!(report.is_complete());
        assert_eq!(report.state, RunState::Initialized);
        assert_eq!(report.pages + report.partials + report.assets_copied, 0);
    }
}
