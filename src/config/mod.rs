//! Configuration management for the importer

mod settings;

pub use settings::{ClientSettings, Config, ConfigOverrides, FileConfig, CLIENT_SECRET_ENV};
