//! In-memory logger for asserting on run output.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;
use std::sync::Mutex;

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that records every message it receives.
///
/// Lines are kept in arrival order, which across workers is arbitrary.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<LogLine>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured lines.
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Counts captured lines whose message contains `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .lock()
            .map(|lines| lines.iter().filter(|l| l.message.contains(needle)).count())
            .unwrap_or(0)
    }

    /// Counts captured lines at the given level.
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.lines
            .lock()
            .map(|lines| lines.iter().filter(|l| l.level == level).count())
            .unwrap_or(0)
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(LogLine {
                level,
                message: args.to_string(),
            });
        }
    }
}
