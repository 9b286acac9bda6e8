//! Logging abstraction layer.
//!
//! The worker pool reports per-job progress through the [`Logger`] trait
//! instead of calling `tracing` directly, so that a run can be observed line
//! by line in tests.
//!
//! - [`TracingLogger`]: production adapter that forwards to `tracing`
//! - [`NoOpLogger`]: discards everything
//! - [`RecordingLogger`]: keeps every line in memory for assertions
//!
//! ```
//! use unmark::log::{Logger, RecordingLogger};
//! use unmark::log_info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(RecordingLogger::new());
//! log_info!(logger, "Worker {}: processing record {}", 1, "abc");
//! assert_eq!(logger.count_containing("processing record abc"), 1);
//! ```

mod noop;
mod recording;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use recording::{LogLine, RecordingLogger};
pub use tracing_adapter::TracingLogger;
