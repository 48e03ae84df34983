use crate::metrics::RunMetrics;
use crate::models::{DocumentReport, InsertionOutcome, RunSummary};
use crate::services::patcher::DisclaimerPatcher;
use crate::services::storage::DocumentStore;
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Semaphore, watch};

/// Everything a finished run reports.
#[derive(Debug)]
pub struct BatchReport {
    /// Number of candidate documents handed to the run
    pub candidates: usize,

    /// One outcome per candidate, in candidate order
    pub documents: Vec<DocumentReport>,

    pub summary: RunSummary,
}

/// Runs a [`DisclaimerPatcher`] over a set of documents.
///
/// Each distinct path is its own task; a path listed more than once is
/// patched repeatedly inside that one task. A semaphore with
/// `max_concurrent` permits bounds how many are patched at once; with one
/// permit the run is strictly sequential. File work happens on the blocking
/// pool.
///
/// # Cancellation
///
/// Setting the watch channel to `true` stops every task still waiting for a
/// permit; those documents are left untouched and reported as cancelled. A
/// document already being patched is allowed to finish, so no write is ever
/// cut short.
pub struct BatchRunner {
    patcher: Arc<DisclaimerPatcher>,
    store: Arc<dyn DocumentStore>,
    max_concurrent: usize,
}

impl BatchRunner {
    pub fn new(
        patcher: DisclaimerPatcher,
        store: Arc<dyn DocumentStore>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            patcher: Arc::new(patcher),
            store,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub async fn run(
        &self,
        paths: Vec<Utf8PathBuf>,
        cancel_rx: watch::Receiver<bool>,
    ) -> BatchReport {
        let candidates = paths.len();
        let metrics = Arc::new(RunMetrics::new());
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));

        // Repeated paths share one task so the same document is never patched concurrently
        let mut occurrences: IndexMap<Utf8PathBuf, Vec<usize>> = IndexMap::new();
        for (index, path) in paths.into_iter().enumerate() {
            occurrences.entry(path).or_default().push(index);
        }

        tracing::info!(
            "Processing {} documents ({} distinct, max concurrent: {}, mode: {:?})",
            candidates,
            occurrences.len(),
            self.max_concurrent,
            self.patcher.mode()
        );

        let mut tasks = Vec::with_capacity(occurrences.len());

        for (path, indices) in occurrences {
            let patcher = self.patcher.clone();
            let store = self.store.clone();
            let semaphore = semaphore.clone();
            let mut cancel_rx = cancel_rx.clone();
            let task_path = path.clone();
            let repeats = indices.len();

            let task = tokio::spawn(async move {
                let path = task_path;
                let _permit = tokio::select! {
                    biased;

                    Ok(_) = cancel_rx.wait_for(|cancelled| *cancelled) => {
                        tracing::warn!("Run cancelled before starting {}", path);
                        return cancelled_outcomes(repeats);
                    }
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return cancelled_outcomes(repeats),
                    },
                };

                tracing::debug!("Processing {}", path);

                let result = tokio::task::spawn_blocking(move || {
                    (0..repeats)
                        .map(|_| {
                            let start = Instant::now();
                            let outcome = patcher.patch(&path, store.as_ref());
                            (outcome, Some(start.elapsed()))
                        })
                        .collect::<Vec<_>>()
                })
                .await;

                result.unwrap_or_else(|e| aborted_outcomes(repeats, &e.to_string()))
            });

            tasks.push((path, indices, task));
        }

        let mut slots: Vec<Option<InsertionOutcome>> = (0..candidates).map(|_| None).collect();
        let mut names: Vec<Option<Utf8PathBuf>> = vec![None; candidates];

        for (path, indices, task) in tasks {
            let outcomes = match task.await {
                Ok(outcomes) => outcomes,
                Err(e) => {
                    tracing::error!("Task for {} did not complete: {}", path, e);
                    aborted_outcomes(indices.len(), &e.to_string())
                }
            };

            for (index, (outcome, elapsed)) in indices.into_iter().zip(outcomes) {
                metrics.record_outcome(outcome.kind());
                if let Some(elapsed) = elapsed {
                    metrics.record_patch_time(elapsed);
                }
                slots[index] = Some(outcome);
                names[index] = Some(path.clone());
            }
        }

        metrics.log_summary();

        let documents = slots
            .into_iter()
            .zip(names)
            .filter_map(|(outcome, path)| {
                Some(DocumentReport {
                    path: path?,
                    outcome: outcome?,
                })
            })
            .collect();

        BatchReport {
            candidates,
            documents,
            summary: metrics.snapshot(),
        }
    }
}

type TimedOutcome = (InsertionOutcome, Option<Duration>);

fn cancelled_outcomes(count: usize) -> Vec<TimedOutcome> {
    (0..count).map(|_| (InsertionOutcome::Cancelled, None)).collect()
}

fn aborted_outcomes(count: usize, reason: &str) -> Vec<TimedOutcome> {
    tracing::error!("Patch task aborted: {}", reason);
    (0..count)
        .map(|_| (InsertionOutcome::Aborted(reason.to_string()), None))
        .collect()
}
