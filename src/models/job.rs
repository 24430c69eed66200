//! Import job models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status value of a job that has not finished yet
pub const PENDING_STATUS: &str = "pending";

/// A users-import job as reported by the jobs endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,

    /// Remote status ("pending", "completed", "failed", ...)
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Only meaningful once the job left the pending state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<JobSummary>,

    /// Remaining fields of the payload, kept for the results file
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Check if the job is still waiting to be processed
    pub fn is_pending(&self) -> bool {
        self.status == PENDING_STATUS
    }

    /// Summary counters, zeroed when the service sent none
    pub fn summary_or_default(&self) -> JobSummary {
        self.summary.clone().unwrap_or_default()
    }
}

/// Record counts of a finished job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub failed: u64,
}

/// One offending user record from the job errors endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobErrorRecord {
    /// The user record as submitted
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub errors: Vec<RecordError>,
}

impl JobErrorRecord {
    /// Email of the offending user, if the record carried one
    pub fn user_email(&self) -> Option<&str> {
        self.user.get("email").and_then(Value::as_str)
    }
}

/// A single validation or import failure for a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
