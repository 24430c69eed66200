//! Job submission and the polling loop

use super::Importer;
use crate::error::{ImportError, ImportResult};
use crate::models::{Job, RunStats};
use std::path::Path;
use tracing::{debug, info, instrument};

impl Importer {
    /// Submit one file and wait for its job to finish
    #[instrument(skip(self, stats), fields(file = %file.display()))]
    pub(super) async fn submit(&self, stats: RunStats, file: &Path) -> ImportResult<RunStats> {
        let connection_id = stats.connection_id.as_deref().ok_or_else(|| {
            ImportError::Config("Connection must be resolved before submitting files".to_string())
        })?;

        let job = self
            .client
            .submit_users_import(connection_id, stats.upsert, stats.notify_by_email, file)
            .await?;
        info!(job_id = %job.id, status = %job.status, "Submitted import job");

        self.poll(stats, file.display().to_string(), job).await
    }

    /// Observe a job until it leaves the pending state, then record its outcome
    ///
    /// There is no timeout: a job stuck in pending is polled indefinitely.
    async fn poll(&self, mut stats: RunStats, name: String, mut job: Job) -> ImportResult<RunStats> {
        while job.is_pending() {
            tokio::time::sleep(self.settings.poll_interval).await;
            job = self.client.get_job(&job.id).await?;
            debug!(job_id = %job.id, status = %job.status, "Polled import job");
        }

        let errors = self.client.get_job_errors(&job.id).await?;
        let summary = job.summary_or_default();
        info!(
            job_id = %job.id,
            status = %job.status,
            inserted = summary.inserted,
            updated = summary.updated,
            failed = summary.failed,
            errors = errors.len(),
            "Import job finished"
        );

        stats.push_file(name, job, errors);
        Ok(stats)
    }
}
