//! Audit logging of argfile reads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::argfile::ArgfileRecord;

/// An audit log entry.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the read.
    pub timestamp: DateTime<Utc>,
    /// Marker of the reference that named the file.
    pub marker: String,
    /// Resolved argfile path.
    pub path: String,
    /// Number of arguments spliced in.
    pub tokens: usize,
    /// Diagnostic produced, if the file could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    pub fn new(record: &ArgfileRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            marker: record.marker.clone(),
            path: record.path.display().to_string(),
            tokens: record.tokens,
            error: record.error.clone(),
        }
    }
}

/// Audit logger appending JSON lines to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Log every argfile consulted during one expansion.
    pub fn log_records(&mut self, records: &[ArgfileRecord]) -> std::io::Result<()> {
        for record in records {
            self.log(&AuditEntry::new(record))?;
        }
        Ok(())
    }
}
