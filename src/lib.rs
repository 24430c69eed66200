//! Bulk user import for Auth0 database connections
//!
//! Uploads JSON user files to the Management API jobs endpoint, one file at
//! a time, and waits for each job to finish. The [`Importer`] owns its API
//! client and credentials; nothing is shared process-wide.
//!
//! ```rust,ignore
//! use auth0_import::{Config, ConfigOverrides, ImportOptions, Importer};
//!
//! let config = Config::load(Some(path), ConfigOverrides::default())?;
//! let importer = Importer::from_config(&config)?;
//! let stats = importer
//!     .run(&ImportOptions::from(&config), &["users/*.json".to_string()])
//!     .await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod files;
pub mod import;
pub mod logging;
pub mod models;
pub mod output;

pub use config::{ClientSettings, Config, ConfigOverrides};
pub use error::{ImportError, ImportResult};
pub use import::{ImportOptions, ImportSettings, Importer};
pub use models::{FileResult, RunStats};
