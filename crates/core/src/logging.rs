//! Leveled message sink used by the villa handlers.
//!
//! Handlers report what they did through [`Logging`] rather than calling
//! `tracing` directly, so the sink is injected with the rest of the
//! application state and can be swapped for [`MemoryLogging`] in tests.

use std::sync::Mutex;

/// Level for operations that completed.
pub const LEVEL_SUCCESS: &str = "success";
/// Level for rejected requests and failures.
pub const LEVEL_ERROR: &str = "error";
/// Level for recoverable oddities.
pub const LEVEL_WARNING: &str = "warning";

/// A sink accepting a message and an open-ended level string.
pub trait Logging: Send + Sync {
    fn log(&self, message: &str, level: &str);
}

/// Forwards messages to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogging;

impl Logging for TracingLogging {
    fn log(&self, message: &str, level: &str) {
        match level {
            LEVEL_ERROR => tracing::error!(log_level = level, "{message}"),
            LEVEL_WARNING => tracing::warn!(log_level = level, "{message}"),
            _ => tracing::info!(log_level = level, "{message}"),
        }
    }
}

/// A recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub level: String,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemoryLogging {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Entries logged at `level`.
    pub fn at_level(&self, level: &str) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl Logging for MemoryLogging {
    fn log(&self, message: &str, level: &str) {
        let entry = LogEntry {
            message: message.to_string(),
            level: level.to_string(),
        };
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
