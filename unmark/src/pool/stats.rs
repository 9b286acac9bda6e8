//! Run-wide job statistics.

use super::outcome::JobOutcome;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Thread-safe counters shared by the producer and every worker.
#[derive(Debug, Default)]
pub struct RunStats {
    enqueued: AtomicU64,
    dequeued: AtomicU64,
    updated: AtomicU64,
    update_failed: AtomicU64,
    failed: AtomicU64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dequeued(&self) {
        self.dequeued.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a finished job under its outcome.
    pub fn record_outcome(&self, outcome: &JobOutcome) {
        let counter = match outcome {
            JobOutcome::Updated { .. } => &self.updated,
            JobOutcome::StoredWithoutUpdate { .. } => &self.update_failed,
            JobOutcome::Failed(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a snapshot of the counters.
    pub fn snapshot(&self, elapsed: Duration) -> RunReport {
        RunReport {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            dequeued: self.dequeued.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            update_failed: self.update_failed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped_records: 0,
            elapsed,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Jobs pushed onto the queue
    pub enqueued: u64,
    /// Jobs taken off the queue by workers
    pub dequeued: u64,
    /// Artifact stored and record updated
    pub updated: u64,
    /// Artifact stored, record update failed
    pub update_failed: u64,
    /// Abandoned before storing an artifact
    pub failed: u64,
    /// Records skipped during enumeration because they failed to decode
    pub skipped_records: u64,
    pub elapsed: Duration,
}

impl RunReport {
    /// Jobs that reached the store, whether or not the record update worked.
    pub fn processed(&self) -> u64 {
        self.updated + self.update_failed
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} enqueued, {} updated, {} stored without record update, {} failed, {} skipped in {:.1}s",
            self.enqueued,
            self.updated,
            self.update_failed,
            self.failed,
            self.skipped_records,
            self.elapsed.as_secs_f64()
        )
    }
}
