//! Configuration merged from a JSON file, CLI flags and the environment

use crate::error::{ImportError, ImportResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the client secret from the config file
pub const CLIENT_SECRET_ENV: &str = "AUTH0_CLIENT_SECRET";

/// Default HTTP timeout for Management API requests
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of the JSON configuration file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub domain: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub connection: Option<String>,
    pub upsert: Option<bool>,
    pub email: Option<bool>,
    pub results_file: Option<PathBuf>,
}

impl FileConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> ImportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ImportError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }
}

/// Values given on the command line; they take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub domain: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub connection: Option<String>,
    pub upsert: bool,
    pub email: bool,
    pub results_file: Option<PathBuf>,
}

/// Resolved importer configuration
#[derive(Debug)]
pub struct Config {
    /// Tenant domain without scheme, e.g. `example.eu.auth0.com`
    pub domain: String,
    pub client_id: String,
    pub client_secret: SecretString,
    /// Target connection name; may be empty; checked when the import starts
    pub connection: String,
    pub upsert: bool,
    pub email: bool,
    pub results_file: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Config {
    /// Load the optional config file, then merge CLI values and the environment
    pub fn load(config_file: Option<&Path>, overrides: ConfigOverrides) -> ImportResult<Self> {
        let file = match config_file {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let env_secret = std::env::var(CLIENT_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty());

        Self::resolve(file, overrides, env_secret)
    }

    /// Merge the three sources; CLI wins, then environment (secret only), then file
    pub fn resolve(
        file: FileConfig,
        overrides: ConfigOverrides,
        env_secret: Option<String>,
    ) -> ImportResult<Self> {
        let domain = overrides
            .domain
            .or(file.domain)
            .map(|d| normalize_domain(&d))
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ImportError::Config("Missing tenant domain".to_string()))?;

        let client_id = overrides
            .client_id
            .or(file.client_id)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ImportError::Config("Missing client id".to_string()))?;

        let client_secret = overrides
            .client_secret
            .or(env_secret)
            .or(file.client_secret)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ImportError::Config(format!(
                    "Missing client secret (set it in the config file, with --client-secret or {CLIENT_SECRET_ENV})"
                ))
            })?;

        Ok(Self {
            domain,
            client_id,
            client_secret: SecretString::from(client_secret),
            connection: overrides.connection.or(file.connection).unwrap_or_default(),
            upsert: overrides.upsert || file.upsert.unwrap_or(false),
            email: overrides.email || file.email.unwrap_or(false),
            results_file: overrides.results_file.or(file.results_file),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Management API base URL
    pub fn api_url(&self) -> String {
        format!("https://{}/api/v2", self.domain)
    }

    /// Token endpoint URL
    pub fn token_url(&self) -> String {
        format!("https://{}/oauth/token", self.domain)
    }

    /// Audience the access token is requested for
    pub fn audience(&self) -> String {
        format!("https://{}/api/v2/", self.domain)
    }
}

/// Strip scheme and trailing slashes from a tenant domain
fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

/// Endpoints and credentials the API client is built from
#[derive(Debug)]
pub struct ClientSettings {
    pub api_url: String,
    pub token_url: String,
    pub audience: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub timeout_secs: u64,
}

impl ClientSettings {
    /// Create settings for an explicit API base URL; audience defaults to it
    pub fn new(
        api_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            audience: format!("{api_url}/"),
            api_url,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Derive settings from a resolved configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_url: config.api_url(),
            token_url: config.token_url(),
            audience: config.audience(),
            client_id: config.client_id.clone(),
            client_secret: SecretString::from(config.client_secret.expose_secret().to_string()),
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
