//! Import orchestration
//!
//! An [`Importer`] runs one import end to end:
//!
//! 1. expand the file patterns and drop oversized files
//! 2. resolve and validate the target connection
//! 3. submit each admitted file as an import job, one at a time, polling
//!    each job until it leaves the pending state
//!
//! Per-record failures reported by the service are data in the returned
//! [`RunStats`]; only configuration, authentication, validation and
//! transport errors fail the run.

mod pipeline;

use crate::api::{select_connection, ApiClient};
use crate::config::{ClientSettings, Config};
use crate::error::{ImportError, ImportResult};
use crate::files::{self, MAX_FILE_SIZE};
use crate::models::RunStats;
use std::time::Duration;
use tracing::{info, instrument};

/// Default delay between two observations of a pending job
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// What to import into and how
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Target connection name
    pub connection: String,
    /// Update existing users instead of failing on duplicates
    pub upsert: bool,
    /// Send the completion email when each job finishes
    pub send_completion_email: bool,
}

impl ImportOptions {
    pub fn new(connection: impl Into<String>) -> Self {
        Self {
            connection: connection.into(),
            ..Default::default()
        }
    }

    pub fn with_upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }

    pub fn with_completion_email(mut self, send: bool) -> Self {
        self.send_completion_email = send;
        self
    }
}

impl From<&Config> for ImportOptions {
    fn from(config: &Config) -> Self {
        Self {
            connection: config.connection.clone(),
            upsert: config.upsert,
            send_completion_email: config.email,
        }
    }
}

/// Tunables of the job pipeline
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub poll_interval: Duration,
    pub max_file_size: u64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl ImportSettings {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Runs bulk user imports against one tenant
pub struct Importer {
    client: ApiClient,
    client_id: String,
    settings: ImportSettings,
}

impl Importer {
    pub fn new(client: ApiClient, client_id: impl Into<String>, settings: ImportSettings) -> Self {
        Self {
            client,
            client_id: client_id.into(),
            settings,
        }
    }

    /// Build an importer from a resolved configuration
    pub fn from_config(config: &Config) -> ImportResult<Self> {
        let client = ApiClient::new(&ClientSettings::from_config(config))?;
        Ok(Self::new(client, &config.client_id, ImportSettings::default()))
    }

    /// Get the API client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Import every file matched by `patterns` into the configured connection
    ///
    /// Files are submitted strictly one after the other; the first submission
    /// or polling failure aborts the remaining files. Token renewal is stopped
    /// when this returns, whatever the outcome.
    #[instrument(skip(self, patterns), fields(connection = %options.connection))]
    pub async fn run(&self, options: &ImportOptions, patterns: &[String]) -> ImportResult<RunStats> {
        if options.connection.trim().is_empty() {
            return Err(ImportError::Config("Missing connection name".to_string()));
        }

        if patterns.is_empty() {
            info!("No file patterns given, nothing to import");
            return Ok(RunStats::new(
                &options.connection,
                options.upsert,
                options.send_completion_email,
            )
            .finish());
        }

        let files = files::resolve_files(patterns, self.settings.max_file_size)?;
        info!(files = files.len(), "Resolved files to import");

        let _renewal = self.client.credentials().renewal_guard();

        let mut stats = self.validate_connection(options).await?;
        for file in &files {
            stats = self.submit(stats, file).await?;
        }

        let stats = stats.finish();
        info!(
            files = stats.files.len(),
            inserted = stats.total_inserted(),
            updated = stats.total_updated(),
            failed = stats.total_failed(),
            "Import finished"
        );
        Ok(stats)
    }

    /// Resolve the connection by name and seed the run statistics
    ///
    /// The start time is taken before the lookup.
    pub async fn validate_connection(&self, options: &ImportOptions) -> ImportResult<RunStats> {
        let mut stats = RunStats::new(
            &options.connection,
            options.upsert,
            options.send_completion_email,
        );

        let connections = self.client.list_connections(&options.connection).await?;
        let connection = select_connection(connections, &options.connection, &self.client_id)?;

        info!(connection_id = %connection.id, "Using connection");
        stats.connection_id = Some(connection.id);
        Ok(stats)
    }
}
