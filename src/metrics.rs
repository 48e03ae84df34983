// Run metrics module
//
// Lock-free outcome counters shared by concurrent patch tasks

use crate::models::{OutcomeKind, RunSummary};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Outcome counters for one batch run
///
/// Uses atomic operations so worker tasks can record outcomes without locks.
/// A [`RunSummary`] snapshot is taken once the batch is finished.
#[derive(Debug)]
pub struct RunMetrics {
    pub updated: AtomicUsize,
    pub would_update: AtomicUsize,
    pub skipped_excluded: AtomicUsize,
    pub skipped_already_present: AtomicUsize,
    pub skipped_no_insertion_point: AtomicUsize,
    pub failed: AtomicUsize,

    /// Documents never started because the run was cancelled
    pub cancelled: AtomicUsize,

    /// Time spent inside the patcher, in microseconds
    pub total_patch_time_us: AtomicU64,

    start_time: Instant,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            updated: AtomicUsize::new(0),
            would_update: AtomicUsize::new(0),
            skipped_excluded: AtomicUsize::new(0),
            skipped_already_present: AtomicUsize::new(0),
            skipped_no_insertion_point: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            cancelled: AtomicUsize::new(0),
            total_patch_time_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record one document outcome
    pub fn record_outcome(&self, kind: OutcomeKind) {
        let counter = match kind {
            OutcomeKind::Updated => &self.updated,
            OutcomeKind::WouldUpdate => &self.would_update,
            OutcomeKind::SkippedExcluded => &self.skipped_excluded,
            OutcomeKind::SkippedAlreadyPresent => &self.skipped_already_present,
            OutcomeKind::SkippedNoInsertionPoint => &self.skipped_no_insertion_point,
            OutcomeKind::Failed => &self.failed,
            OutcomeKind::Cancelled => &self.cancelled,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_patch_time(&self, duration: Duration) {
        self.total_patch_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Number of documents that reached the patcher
    pub fn processed(&self) -> usize {
        let s = self.snapshot();
        s.total() - s.cancelled
    }

    /// Average time per processed document in milliseconds
    pub fn avg_patch_time_ms(&self) -> f64 {
        let total = self.total_patch_time_us.load(Ordering::Relaxed);
        let count = self.processed();
        if count > 0 {
            total as f64 / count as f64 / 1000.0
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            updated: self.updated.load(Ordering::Relaxed),
            would_update: self.would_update.load(Ordering::Relaxed),
            skipped_excluded: self.skipped_excluded.load(Ordering::Relaxed),
            skipped_already_present: self.skipped_already_present.load(Ordering::Relaxed),
            skipped_no_insertion_point: self.skipped_no_insertion_point.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self) {
        let s = self.snapshot();
        tracing::info!(
            "Run finished in {:.2}s: {} updated, {} would update, {} skipped \
             ({} excluded, {} already present, {} no insertion point), {} failed, {} cancelled",
            self.elapsed().as_secs_f64(),
            s.updated,
            s.would_update,
            s.skipped(),
            s.skipped_excluded,
            s.skipped_already_present,
            s.skipped_no_insertion_point,
            s.failed,
            s.cancelled
        );
        tracing::debug!("Average patch time: {:.3}ms per document", self.avg_patch_time_ms());
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
