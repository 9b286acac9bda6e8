//! Run orchestration: enumerate, enqueue, drain.
//!
//! The producer and the worker pool run concurrently on the same task. The
//! producer blocks when the queue is full, so enumerating before starting the
//! workers would deadlock on any backlog larger than the queue capacity.

use crate::config::PoolConfig;
use crate::log::Logger;
use crate::pool::{job_queue, RunReport, RunStats, WorkerPool};
use crate::records::{JobSource, RecordError, RecordSource, RecordUpdater};
use crate::storage::ArtifactStore;
use crate::transform::Transformer;
use crate::{log_error, log_info};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that stop a run before any job is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The record store could not be reached at startup
    #[error("startup failed: {0}")]
    Startup(RecordError),

    /// The pending-record query could not be opened
    #[error("failed to enumerate records: {0}")]
    Enumerate(RecordError),
}

/// Drives one batch run from enumeration to drained pool.
pub struct BatchRunner<R, T, S, U> {
    source: JobSource<R>,
    pool: WorkerPool<T, S, U>,
    config: PoolConfig,
    logger: Arc<dyn Logger>,
}

impl<R, T, S, U> BatchRunner<R, T, S, U>
where
    R: RecordSource,
    T: Transformer + 'static,
    S: ArtifactStore + 'static,
    U: RecordUpdater + 'static,
{
    pub fn new(
        source: JobSource<R>,
        pool: WorkerPool<T, S, U>,
        config: PoolConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            source,
            pool,
            config,
            logger,
        }
    }

    /// Processes every pending record once.
    ///
    /// Only a failure to open the enumeration is returned as an error. Job
    /// failures are counted in the returned [`RunReport`].
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let workers = match self.config.workers() {
            0 => {
                warn!("Worker count is 0, using 1 worker");
                1
            }
            n => n,
        };

        let mut jobs = self
            .source
            .enumerate(self.config.query_limit())
            .await
            .map_err(RunError::Enumerate)?;

        info!(
            workers,
            queue_capacity = self.config.queue_capacity(),
            query_limit = self.config.query_limit(),
            "Starting run"
        );

        let (sender, receiver) = job_queue(self.config.queue_capacity());
        let stats = Arc::new(RunStats::new());
        let enqueued = Arc::clone(&stats);
        let logger = Arc::clone(&self.logger);

        let producer = async move {
            while let Some(job) = jobs.next().await {
                if let Err(e) = sender.send(job).await {
                    log_error!(logger, "Stopping enumeration: {}", e);
                    break;
                }
                enqueued.record_enqueued();
            }
            sender.close();
            jobs.skipped()
        };

        let (skipped, mut report) = tokio::join!(
            producer,
            self.pool.run_with_stats(workers, receiver, stats)
        );
        report.skipped_records = skipped;

        log_info!(self.logger, "All jobs completed");
        info!(%report, "Run finished");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::id::UuidKeyGenerator;
    use crate::log::{NoOpLogger, RecordingLogger};
    use crate::pool::JobPipeline;
    use crate::records::{InMemoryRecordStore, Record, RecordStream};
    use crate::storage::{artifact_url, StoreError};
    use crate::transform::TransformError;

    struct EchoTransformer;

    impl Transformer for EchoTransformer {
        async fn transform(&self, source_reference: &str) -> Result<Vec<u8>, TransformError> {
            Ok(source_reference.as_bytes().to_vec())
        }
    }

    struct UrlStore;

    impl ArtifactStore for UrlStore {
        async fn store(
            &self,
            bucket: &str,
            key: &str,
            _content: Vec<u8>,
        ) -> Result<String, StoreError> {
            Ok(artifact_url(bucket, "ap-south-1", key))
        }
    }

    fn runner(
        records: InMemoryRecordStore,
        config: PoolConfig,
        logger: Arc<dyn Logger>,
    ) -> BatchRunner<InMemoryRecordStore, EchoTransformer, UrlStore, InMemoryRecordStore> {
        let pipeline = JobPipeline::new(
            EchoTransformer,
            UrlStore,
            records.clone(),
            Arc::new(UuidKeyGenerator),
            PipelineConfig::new("bucket"),
        );
        BatchRunner::new(
            JobSource::new(records, Arc::clone(&logger)),
            WorkerPool::new(pipeline, Arc::clone(&logger)),
            config,
            logger,
        )
    }

    fn pending(count: usize) -> InMemoryRecordStore {
        InMemoryRecordStore::with_records(
            (0..count).map(|i| Record::pending(format!("r{}", i), format!("https://img/{}", i))),
        )
    }

    #[tokio::test]
    async fn test_backlog_larger_than_queue_drains() {
        let records = pending(50);
        let config = PoolConfig::new().with_workers(3).with_queue_capacity(2);

        let report = runner(records.clone(), config, Arc::new(NoOpLogger))
            .run()
            .await
            .unwrap();

        assert_eq!(report.enqueued, 50);
        assert_eq!(report.dequeued, 50);
        assert_eq!(report.updated, 50);
        assert!(records.records().iter().all(|r| r.result_references.len() == 1));
    }

    #[tokio::test]
    async fn test_zero_workers_clamped() {
        let records = pending(3);
        let config = PoolConfig::new().with_workers(0);

        let report = runner(records, config, Arc::new(NoOpLogger))
            .run()
            .await
            .unwrap();

        assert_eq!(report.updated, 3);
    }

    #[tokio::test]
    async fn test_query_limit_respected() {
        let records = pending(10);
        let config = PoolConfig::new().with_workers(2).with_query_limit(4);

        let report = runner(records.clone(), config, Arc::new(NoOpLogger))
            .run()
            .await
            .unwrap();

        assert_eq!(report.enqueued, 4);
        assert_eq!(report.updated, 4);
        let untouched = records
            .records()
            .iter()
            .filter(|r| r.result_references.is_empty())
            .count();
        assert_eq!(untouched, 6);
    }

    #[tokio::test]
    async fn test_second_run_starts_from_zero() {
        let records = pending(3);
        let runner = runner(records, PoolConfig::new().with_workers(2), Arc::new(NoOpLogger));

        let first = runner.run().await.unwrap();
        let second = runner.run().await.unwrap();

        assert_eq!(first.enqueued, 3);
        assert_eq!(first.updated, 3);
        assert_eq!(second.enqueued, 0);
        assert_eq!(second.dequeued, 0);
        assert_eq!(second.updated, 0);
    }

    #[tokio::test]
    async fn test_empty_store_logs_completion() {
        let logger = Arc::new(RecordingLogger::new());

        let report = runner(pending(0), PoolConfig::new().with_workers(4), logger.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(report, RunReport { elapsed: report.elapsed, ..RunReport::default() });
        assert_eq!(logger.count_containing("All jobs completed"), 1);
    }

    struct BrokenSource;

    impl RecordSource for BrokenSource {
        async fn pending_records(&self, _limit: u64) -> Result<RecordStream, RecordError> {
            Err(RecordError::Store("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_enumeration_failure_is_fatal() {
        let records = InMemoryRecordStore::new();
        let pipeline = JobPipeline::new(
            EchoTransformer,
            UrlStore,
            records,
            Arc::new(UuidKeyGenerator),
            PipelineConfig::new("bucket"),
        );
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        let runner = BatchRunner::new(
            JobSource::new(BrokenSource, Arc::clone(&logger)),
            WorkerPool::new(pipeline, Arc::clone(&logger)),
            PoolConfig::new(),
            logger,
        );

        let err = runner.run().await.unwrap_err();
        assert_eq!(
            err,
            RunError::Enumerate(RecordError::Store("connection reset".to_string()))
        );
    }
}
