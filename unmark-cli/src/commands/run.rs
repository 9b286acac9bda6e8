//! `unmark run`: process every pending record once.

use crate::error::CliError;
use crate::runner::CliRunner;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use unmark::config::{ConfigFile, PipelineConfig, PoolConfig, MAX_WORKERS, MIN_WORKERS};
use unmark::id::UuidKeyGenerator;
use unmark::log::{Logger, TracingLogger};
use unmark::pool::{JobPipeline, WorkerPool};
use unmark::records::{JobSource, MongoRecordStore};
use unmark::run::{BatchRunner, RunError};
use unmark::storage::S3ArtifactStore;
use unmark::transform::{AsyncReqwestClient, TransformClient};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Number of concurrent workers (overrides [pool] workers)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Maximum queued jobs (overrides [pool] queue_capacity)
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Maximum records to process (overrides [mongo] query_limit)
    #[arg(long)]
    pub limit: Option<u64>,
}

impl RunArgs {
    /// Applies command-line overrides on top of the file settings.
    ///
    /// Overrides are held to the same bounds as the config file.
    fn pool_config(&self, config: &ConfigFile) -> Result<PoolConfig, CliError> {
        let mut pool = PoolConfig::from(config);
        if let Some(workers) = self.workers {
            if !(MIN_WORKERS..=MAX_WORKERS).contains(&workers) {
                return Err(CliError::Config(format!(
                    "--workers {} must be between {} and {}",
                    workers, MIN_WORKERS, MAX_WORKERS
                )));
            }
            pool = pool.with_workers(workers);
        }
        if let Some(capacity) = self.queue_capacity {
            if capacity == 0 {
                return Err(CliError::Config(
                    "--queue-capacity must be at least 1".to_string(),
                ));
            }
            pool = pool.with_queue_capacity(capacity);
        }
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(CliError::Config("--limit must be at least 1".to_string()));
            }
            pool = pool.with_query_limit(limit);
        }
        Ok(pool)
    }
}

pub async fn run(config_path: Option<PathBuf>, debug: bool, args: RunArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("run");
    let config = runner.config();
    let pool_config = args.pool_config(config)?;

    if config.s3.bucket.trim().is_empty() {
        return Err(CliError::Config(format!(
            "s3.bucket is not set in {}",
            runner.config_path().display()
        )));
    }

    let records = MongoRecordStore::connect(&config.mongo)
        .await
        .map_err(RunError::Startup)?;

    let http = AsyncReqwestClient::with_timeout(config.transform.timeout_secs)
        .map_err(CliError::HttpClient)?;
    let transformer = TransformClient::new(http, config.transform.endpoint.clone());
    let artifacts = S3ArtifactStore::from_env(config.s3.region.clone()).await;

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let pipeline = JobPipeline::new(
        transformer,
        artifacts,
        records.clone(),
        Arc::new(UuidKeyGenerator),
        PipelineConfig::from(config),
    );

    let batch = BatchRunner::new(
        JobSource::new(records, Arc::clone(&logger)),
        WorkerPool::new(pipeline, Arc::clone(&logger)),
        pool_config,
        logger,
    );

    let report = batch.run().await?;
    info!(
        updated = report.updated,
        failed = report.failed + report.update_failed,
        "Run complete"
    );
    println!("{}", report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let mut config = ConfigFile::default();
        config.pool.workers = 10;

        let args = RunArgs {
            workers: Some(3),
            queue_capacity: None,
            limit: Some(7),
        };
        let pool = args.pool_config(&config).unwrap();

        assert_eq!(pool.workers(), 3);
        assert_eq!(pool.queue_capacity(), config.pool.queue_capacity);
        assert_eq!(pool.query_limit(), 7);
    }

    #[test]
    fn test_no_overrides_uses_file() {
        let config = ConfigFile::default();
        let args = RunArgs {
            workers: None,
            queue_capacity: None,
            limit: None,
        };
        assert_eq!(args.pool_config(&config).unwrap(), PoolConfig::from(&config));
    }

    #[test]
    fn test_worker_override_out_of_range_rejected() {
        let config = ConfigFile::default();
        for workers in [0, MAX_WORKERS + 1, 1_000_000] {
            let args = RunArgs {
                workers: Some(workers),
                queue_capacity: None,
                limit: None,
            };
            let err = args.pool_config(&config).unwrap_err();
            assert!(matches!(err, CliError::Config(ref msg) if msg.contains("--workers")));
        }
    }

    #[test]
    fn test_worker_override_bounds_accepted() {
        let config = ConfigFile::default();
        for workers in [MIN_WORKERS, MAX_WORKERS] {
            let args = RunArgs {
                workers: Some(workers),
                queue_capacity: None,
                limit: None,
            };
            assert_eq!(args.pool_config(&config).unwrap().workers(), workers);
        }
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let args = RunArgs {
            workers: None,
            queue_capacity: Some(0),
            limit: None,
        };
        let err = args.pool_config(&ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("--queue-capacity")));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let args = RunArgs {
            workers: None,
            queue_capacity: None,
            limit: Some(0),
        };
        let err = args.pool_config(&ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains("--limit")));
    }
}
