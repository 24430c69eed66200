//! Token response model

use serde::{Deserialize, Serialize};

/// Response from the client credentials token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Management API access token
    pub access_token: String,

    /// Seconds until the access token expires
    pub expires_in: u64,

    /// Token type (always "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,

    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
}
