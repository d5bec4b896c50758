// src/exec_log.rs

//! In-memory execution log.
//!
//! Each pipe invocation gets its own [`ExecutionLog`]; callers that want a
//! longer history append the returned entries to their own store.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::info;

/// Timestamp layout: local time with microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Source of wall-clock time for log timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp, self.message)
    }
}

/// Append-only, creation-ordered list of [`LogEntry`] values.
#[derive(Clone)]
pub struct ExecutionLog {
    clock: Arc<dyn Clock>,
    entries: Vec<LogEntry>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Vec::new(),
        }
    }

    /// Stamp `message` with the current time and append it.
    pub fn log(&mut self, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            timestamp: self.clock.now().format(TIMESTAMP_FORMAT).to_string(),
            message: message.into(),
        };
        info!(target: "pipevim::exec_log", "{}", entry.message);
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl Default for ExecutionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExecutionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionLog")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Milliseconds with three decimals, e.g. `12.345ms`.
pub fn format_millis(elapsed: Duration) -> String {
    format!("{:.3}ms", elapsed.as_secs_f64() * 1000.0)
}

pub fn executed_message(command: &str, exit_code: i32, elapsed: Duration) -> String {
    format!(
        "command {command:?} executed with return code {exit_code} in {}",
        format_millis(elapsed)
    )
}

pub fn failed_message(command: &str, elapsed: Duration, error: &dyn fmt::Display) -> String {
    format!(
        "command {command:?} failed after {}: {error}",
        format_millis(elapsed)
    )
}
