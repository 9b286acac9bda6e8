//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// Output ends up wherever [`crate::logging::init_logging`] routed the
/// global subscriber (stdout and the session log file). Each [`LogLevel`]
/// maps onto the `tracing` macro of the same name.
///
/// # Example
///
/// ```ignore
/// use unmark::log::{Logger, TracingLogger};
/// use std::sync::Arc;
///
/// // Assumes the tracing subscriber is already initialized
/// let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
/// logger.info(format_args!("Worker {}: successfully updated record {}", 3, "64f0c0ffee"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing logger adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        }
    }
}
