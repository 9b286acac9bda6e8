//! Fixed-size pool of async workers sharing one job queue.

use super::outcome::{JobError, JobOutcome};
use super::pipeline::JobPipeline;
use super::queue::JobReceiver;
use super::stats::{RunReport, RunStats};
use crate::log::Logger;
use crate::records::{JobDescriptor, RecordUpdater};
use crate::storage::ArtifactStore;
use crate::transform::Transformer;
use crate::{log_error, log_info, log_warn};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Runs jobs from a [`JobReceiver`] on a fixed number of tokio tasks.
///
/// Every worker processes one job at a time. Job failures, including panics
/// raised by a collaborator, are logged and counted; the worker then moves on
/// to the next job.
pub struct WorkerPool<T, S, U> {
    pipeline: Arc<JobPipeline<T, S, U>>,
    logger: Arc<dyn Logger>,
}

impl<T, S, U> WorkerPool<T, S, U>
where
    T: Transformer + 'static,
    S: ArtifactStore + 'static,
    U: RecordUpdater + 'static,
{
    pub fn new(pipeline: JobPipeline<T, S, U>, logger: Arc<dyn Logger>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            logger,
        }
    }

    /// Starts `worker_count` workers and waits for all of them to finish.
    ///
    /// Returns once the queue is closed and drained and every worker has
    /// completed its last job. With zero workers nothing is dequeued and the
    /// call returns immediately. Each call counts into fresh statistics.
    pub async fn run(&self, worker_count: usize, jobs: JobReceiver) -> RunReport {
        self.run_with_stats(worker_count, jobs, Arc::new(RunStats::new()))
            .await
    }

    /// Like [`run`](Self::run), counting into `stats`.
    ///
    /// Lets the producer record enqueues into the same counters the workers
    /// use. `stats` should be fresh for every run.
    pub async fn run_with_stats(
        &self,
        worker_count: usize,
        jobs: JobReceiver,
        stats: Arc<RunStats>,
    ) -> RunReport {
        let start = Instant::now();
        let mut workers = JoinSet::new();

        for worker_id in 1..=worker_count {
            workers.spawn(worker_loop(
                worker_id,
                jobs.clone(),
                Arc::clone(&self.pipeline),
                Arc::clone(&stats),
                Arc::clone(&self.logger),
            ));
        }
        drop(jobs);

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                // Job panics are caught inside the loop; this is the task itself
                tracing::error!(error = %e, "Worker task terminated abnormally");
            }
        }

        stats.snapshot(start.elapsed())
    }
}

async fn worker_loop<T, S, U>(
    worker_id: usize,
    jobs: JobReceiver,
    pipeline: Arc<JobPipeline<T, S, U>>,
    stats: Arc<RunStats>,
    logger: Arc<dyn Logger>,
) where
    T: Transformer,
    S: ArtifactStore,
    U: RecordUpdater,
{
    while let Some(job) = jobs.recv().await {
        stats.record_dequeued();
        log_info!(
            logger,
            "Worker {}: processing record {}",
            worker_id,
            job.record_id()
        );

        let outcome = run_contained(&pipeline, &job).await;
        report(worker_id, &job, &outcome, logger.as_ref());
        stats.record_outcome(&outcome);
    }
}

/// Runs one job, turning a panic into [`JobError::Panicked`].
async fn run_contained<T, S, U>(pipeline: &JobPipeline<T, S, U>, job: &JobDescriptor) -> JobOutcome
where
    T: Transformer,
    S: ArtifactStore,
    U: RecordUpdater,
{
    match AssertUnwindSafe(pipeline.process(job)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => JobOutcome::Failed(JobError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn report(worker_id: usize, job: &JobDescriptor, outcome: &JobOutcome, logger: &dyn Logger) {
    match outcome {
        JobOutcome::Updated { .. } => log_info!(
            logger,
            "Worker {}: successfully updated record {}",
            worker_id,
            job.record_id()
        ),
        JobOutcome::StoredWithoutUpdate { url, error } => log_warn!(
            logger,
            "Worker {}: stored {} but failed to update record {}: {}",
            worker_id,
            url,
            job.record_id(),
            error
        ),
        JobOutcome::Failed(error) => log_error!(
            logger,
            "Worker {}: failed to process record {}: {}",
            worker_id,
            job.record_id(),
            error
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
