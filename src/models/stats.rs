//! Run statistics accumulated over one import

use crate::models::{Job, JobErrorRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate result of one import run
///
/// Files appear in submission order. A file excluded by the admission filter
/// never shows up here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Connection name as requested
    pub connection: String,

    /// Resolved connection id, unset when nothing was imported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,

    pub upsert: bool,

    pub notify_by_email: bool,

    pub files: Vec<FileResult>,
}

/// Outcome of one submitted file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub name: String,
    /// Terminal job status payload
    pub result: Job,
    pub errors: Vec<JobErrorRecord>,
}

impl RunStats {
    /// Create an empty run starting now
    pub fn new(connection: impl Into<String>, upsert: bool, notify_by_email: bool) -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            connection: connection.into(),
            connection_id: None,
            upsert,
            notify_by_email,
            files: Vec::new(),
        }
    }

    /// Record a finished file
    pub fn push_file(&mut self, name: String, result: Job, errors: Vec<JobErrorRecord>) {
        self.files.push(FileResult {
            name,
            result,
            errors,
        });
    }

    /// Stamp the end time
    pub fn finish(mut self) -> Self {
        self.end_time = Some(Utc::now());
        self
    }

    pub fn total_inserted(&self) -> u64 {
        self.files
            .iter()
            .map(|f| f.result.summary_or_default().inserted)
            .sum()
    }

    pub fn total_updated(&self) -> u64 {
        self.files
            .iter()
            .map(|f| f.result.summary_or_default().updated)
            .sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.files
            .iter()
            .map(|f| f.result.summary_or_default().failed)
            .sum()
    }

    /// Number of error records across all files
    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.errors.len()).sum()
    }

    /// Check if any submitted file reported record errors
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| !f.errors.is_empty())
    }

    /// Wall-clock duration, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}
