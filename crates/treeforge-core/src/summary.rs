//! Run summary derived from the materialization log

use crate::materialize::{EntryClass, LogEntry};
use serde::Serialize;

/// Counts of created vs skipped/failed nodes for one run
///
/// Informational entries (`AlreadyExists`, `PrefixApplied`, `RootCreated`)
/// land in neither bucket. Computed fresh from the log after each run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub created: usize,
    pub skipped_or_failed: usize,
}

impl RunSummary {
    /// True if nothing was skipped and nothing failed
    pub fn is_clean(&self) -> bool {
        self.skipped_or_failed == 0
    }
}

/// Tally a run log into a [`RunSummary`]
pub fn summarize(entries: &[LogEntry]) -> RunSummary {
    let mut summary = RunSummary::default();
    for entry in entries {
        match entry.class() {
            EntryClass::Created => summary.created += 1,
            EntryClass::SkippedOrFailed => summary.skipped_or_failed += 1,
            EntryClass::Info => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_summarize_buckets() {
        let entries = vec![
            LogEntry::RootCreated {
                path: PathBuf::from("/tmp/root"),
            },
            LogEntry::Created {
                path: PathBuf::from("/tmp/root/a"),
            },
            LogEntry::AlreadyExists {
                path: PathBuf::from("/tmp/root/b"),
            },
            LogEntry::PrefixApplied {
                name: "c".to_string(),
                final_name: "X_c".to_string(),
            },
            LogEntry::SkippedIllegalChars {
                name: "X_c<".to_string(),
            },
            LogEntry::PermissionDenied {
                path: PathBuf::from("/tmp/root/d"),
            },
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.created, 1);
        assert_eq!(summary.skipped_or_failed, 2);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_summarize_empty_log() {
        let summary = summarize(&[]);
        assert_eq!(summary.created, 0);
        assert_eq!(summary.skipped_or_failed, 0);
        assert!(summary.is_clean());
    }
}
