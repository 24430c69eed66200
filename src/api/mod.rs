//! Management API client

pub mod auth;
mod client;
pub mod connections;
pub mod credentials;
mod jobs;

pub use auth::{ClientCredentials, TokenProvider, IMPORT_SCOPES};
pub use client::ApiClient;
pub use connections::select_connection;
pub use credentials::{CredentialManager, RenewalGuard, RENEW_INTERVAL};
