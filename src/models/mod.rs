//! Data models for the Management API and import results

pub mod connection;
pub mod job;
pub mod stats;
pub mod token;

pub use connection::{Connection, DATABASE_STRATEGY};
pub use job::{Job, JobErrorRecord, JobSummary, RecordError};
pub use stats::{FileResult, RunStats};
pub use token::TokenResponse;
