use crate::services::storage::StorageError;
use camino::Utf8PathBuf;
use std::fmt;

/// Result of running the patcher over one document.
#[derive(Debug)]
pub enum InsertionOutcome {
    /// The warning block was written to disk
    Updated { variant: String, line: usize },

    /// Dry run: the block would have been written
    WouldUpdate { variant: String, line: usize },

    SkippedExcluded,
    SkippedAlreadyPresent,

    /// The document has no title followed by a rule or section heading
    SkippedNoInsertionPoint,

    Failed(StorageError),

    /// The patch task ended without producing an outcome
    Aborted(String),

    /// Never started because the run was cancelled
    Cancelled,
}

/// Outcome kind without payload, used for tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Updated,
    WouldUpdate,
    SkippedExcluded,
    SkippedAlreadyPresent,
    SkippedNoInsertionPoint,
    Failed,
    Cancelled,
}

impl InsertionOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Updated { .. } => OutcomeKind::Updated,
            Self::WouldUpdate { .. } => OutcomeKind::WouldUpdate,
            Self::SkippedExcluded => OutcomeKind::SkippedExcluded,
            Self::SkippedAlreadyPresent => OutcomeKind::SkippedAlreadyPresent,
            Self::SkippedNoInsertionPoint => OutcomeKind::SkippedNoInsertionPoint,
            Self::Failed(_) | Self::Aborted(_) => OutcomeKind::Failed,
            Self::Cancelled => OutcomeKind::Cancelled,
        }
    }
}

impl OutcomeKind {
    /// Report tag shown in front of the document name
    pub fn tag(self) -> &'static str {
        match self {
            Self::Updated => "[OK]",
            Self::WouldUpdate => "[DRY-RUN]",
            Self::SkippedExcluded | Self::SkippedAlreadyPresent => "[SKIP]",
            Self::SkippedNoInsertionPoint => "[WARN]",
            Self::Failed => "[ERROR]",
            Self::Cancelled => "[CANCELLED]",
        }
    }
}

impl fmt::Display for InsertionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated { variant, line } => {
                write!(f, "updated ({} warning at line {})", variant, line + 1)
            }
            Self::WouldUpdate { variant, line } => {
                write!(f, "would update ({} warning at line {})", variant, line + 1)
            }
            Self::SkippedExcluded => write!(f, "excluded"),
            Self::SkippedAlreadyPresent => write!(f, "disclaimer already present"),
            Self::SkippedNoInsertionPoint => write!(f, "could not find insertion point"),
            Self::Failed(e) => write!(f, "{}", e),
            Self::Aborted(reason) => write!(f, "aborted ({})", reason),
            Self::Cancelled => write!(f, "not started"),
        }
    }
}

/// One line of the run report.
#[derive(Debug)]
pub struct DocumentReport {
    pub path: Utf8PathBuf,
    pub outcome: InsertionOutcome,
}

impl DocumentReport {
    /// File name shown in the report, falling back to the full path
    pub fn display_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }
}

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: usize,
    pub would_update: usize,
    pub skipped_excluded: usize,
    pub skipped_already_present: usize,
    pub skipped_no_insertion_point: usize,
    pub failed: usize,

    /// Documents never started because the run was cancelled
    pub cancelled: usize,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_excluded + self.skipped_already_present + self.skipped_no_insertion_point
    }

    pub fn total(&self) -> usize {
        self.updated + self.would_update + self.skipped() + self.failed + self.cancelled
    }
}
