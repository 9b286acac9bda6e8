//! Run-time configuration for the job pipeline and worker pool.

use super::defaults::{
    DEFAULT_KEY_PREFIX, DEFAULT_QUERY_LIMIT, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS,
};
use super::settings::ConfigFile;

/// Where and how stored artifacts are named.
///
/// # Example
///
/// ```
/// use unmark::config::PipelineConfig;
///
/// let config = PipelineConfig::new("artifacts").with_key_prefix("clean");
/// assert_eq!(config.bucket(), "artifacts");
/// assert_eq!(config.key_prefix(), "clean");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    bucket: String,
    key_prefix: String,
}

impl PipelineConfig {
    /// Create a pipeline configuration for `bucket` with the default key prefix.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Set the key prefix. Leading and trailing slashes are dropped.
    ///
    /// Default: `images`.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }
}

impl From<&ConfigFile> for PipelineConfig {
    fn from(config: &ConfigFile) -> Self {
        Self::new(config.s3.bucket.clone()).with_key_prefix(config.s3.key_prefix.clone())
    }
}

/// Worker pool and enumeration limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    workers: usize,
    queue_capacity: usize,
    query_limit: u64,
}

impl PoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of concurrent workers.
    ///
    /// Default: 100 workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set how many jobs may wait in the queue before the producer blocks.
    ///
    /// Default: 10000 jobs.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the maximum number of records enumerated in one run.
    ///
    /// Default: 50000 records.
    pub fn with_query_limit(mut self, limit: u64) -> Self {
        self.query_limit = limit;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn query_limit(&self) -> u64 {
        self.query_limit
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl From<&ConfigFile> for PoolConfig {
    fn from(config: &ConfigFile) -> Self {
        Self::new()
            .with_workers(config.pool.workers)
            .with_queue_capacity(config.pool.queue_capacity)
            .with_query_limit(config.mongo.query_limit)
    }
}
