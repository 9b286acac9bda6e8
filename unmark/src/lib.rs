//! unmark - batch watermark removal for stored listing images
//!
//! Finds records whose result field is still empty, sends each record's
//! source image URL to a watermark removal service, uploads the cleaned bytes
//! to S3, and writes the public URL back onto the record.
//!
//! # Architecture
//!
//! ```text
//! RecordSource ──► JobSource ──► job queue ──► WorkerPool (N workers)
//!  (MongoDB)                     (bounded)          │
//!                                                   ▼
//!                                     Transformer → ArtifactStore → RecordUpdater
//!                                      (HTTP)          (S3)           (MongoDB)
//! ```
//!
//! Every external system sits behind a trait ([`transform::Transformer`],
//! [`storage::ArtifactStore`], [`records::RecordSource`],
//! [`records::RecordUpdater`], [`id::KeyGenerator`]) so the pool can be run
//! entirely in memory:
//!
//! ```ignore
//! use unmark::run::BatchRunner;
//!
//! let runner = BatchRunner::new(source, pool, PoolConfig::from(&config), logger);
//! let report = runner.run().await?;
//! println!("{}", report);
//! ```

pub mod config;
pub mod id;
pub mod log;
pub mod logging;
pub mod pool;
pub mod records;
pub mod run;
pub mod storage;
pub mod transform;

/// Version of the unmark library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
