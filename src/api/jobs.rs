//! Users-import job endpoints

use crate::api::ApiClient;
use crate::error::{ImportError, ImportResult};
use crate::models::{Job, JobErrorRecord};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::instrument;

/// Content type of uploaded user files
const USERS_CONTENT_TYPE: &str = "application/json";

impl ApiClient {
    /// Upload a users file as a new import job
    #[instrument(skip(self, file), fields(file = %file.display()))]
    pub async fn submit_users_import(
        &self,
        connection_id: &str,
        upsert: bool,
        send_completion_email: bool,
        file: &Path,
    ) -> ImportResult<Job> {
        let form = Form::new()
            .part("users", users_part(file).await?)
            .text("connection_id", connection_id.to_string())
            .text("upsert", upsert.to_string())
            .text("send_completion_email", send_completion_email.to_string());

        self.post_multipart("jobs/users-imports", form).await
    }

    /// Get the current state of a job
    #[instrument(skip(self))]
    pub async fn get_job(&self, id: &str) -> ImportResult<Job> {
        self.get_json(&format!("jobs/{id}"), &[]).await
    }

    /// Get the per-record errors of a finished job
    #[instrument(skip(self))]
    pub async fn get_job_errors(&self, id: &str) -> ImportResult<Vec<JobErrorRecord>> {
        self.get_json_or_default(&format!("jobs/{id}/errors")).await
    }
}

/// Stream a file as the `users` form part
async fn users_part(file: &Path) -> ImportResult<Part> {
    let handle = tokio::fs::File::open(file)
        .await
        .map_err(|e| ImportError::Io(format!("Cannot open {}: {}", file.display(), e)))?;
    let length = handle.metadata().await?.len();
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "users.json".to_string());

    Part::stream_with_length(handle, length)
        .file_name(file_name)
        .mime_str(USERS_CONTENT_TYPE)
        .map_err(Into::into)
}
