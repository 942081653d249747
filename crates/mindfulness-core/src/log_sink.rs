//! Append-only activity log.
//!
//! One [`LogRecord`] is appended per completed activity:
//!
//! ```text
//! 2024-05-01 09:30:12 | Listing Activity | Duration: 30 seconds | Items: 4
//! ```
//!
//! The log is write-only. Writes are best-effort: [`LogSink::append`] never
//! fails, and a failed file write is reported through `tracing` and dropped.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::LogWriteError;

/// Timestamp layout used in the log file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default file name inside the data directory.
pub const DEFAULT_LOG_FILE: &str = "mindfulness_log.txt";

/// A single completion line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub activity: String,
    /// Configured duration, not measured elapsed time.
    pub duration_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | Duration: {} seconds",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.activity,
            self.duration_secs
        )?;
        if let Some(items) = self.items {
            write!(f, " | Items: {items}")?;
        }
        Ok(())
    }
}

/// Destination for completion records.
pub trait LogSink {
    /// Append a record. Failures are swallowed.
    fn append(&self, record: &LogRecord);
}

/// Appends records as lines to a text file.
#[derive(Debug)]
pub struct FileLogSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, reporting the failure instead of swallowing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn try_append(&self, record: &LogRecord) -> Result<(), LogWriteError> {
        // A poisoned lock still serializes writers.
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let wrap = |source| LogWriteError {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        writeln!(file, "{record}").map_err(wrap)
    }
}

impl LogSink for FileLogSink {
    fn append(&self, record: &LogRecord) {
        if let Err(e) = self.try_append(record) {
            tracing::warn!(error = %e, activity = %record.activity, "activity log write dropped");
        }
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemoryLogSink {
    fn append(&self, record: &LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}
