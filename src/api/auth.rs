//! Client credentials authentication against the tenant token endpoint

use crate::config::ClientSettings;
use crate::error::{ImportError, ImportResult};
use crate::models::TokenResponse;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

/// Scopes needed to list connections and create import jobs
pub const IMPORT_SCOPES: &str = "create:users read:connections";

/// Source of Management API access tokens
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Request a fresh access token
    async fn request_token(&self) -> ImportResult<TokenResponse>;
}

/// Client credentials grant for a machine-to-machine application
pub struct ClientCredentials {
    http: Client,
    token_url: String,
    audience: String,
    client_id: String,
    client_secret: SecretString,
}

#[derive(Serialize)]
struct ClientCredentialsRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    audience: &'a str,
    scope: &'a str,
}

impl ClientCredentials {
    pub fn new(http: Client, settings: &ClientSettings) -> Self {
        Self {
            http,
            token_url: settings.token_url.clone(),
            audience: settings.audience.clone(),
            client_id: settings.client_id.clone(),
            client_secret: SecretString::from(settings.client_secret.expose_secret().to_string()),
        }
    }
}

#[async_trait]
impl TokenProvider for ClientCredentials {
    #[instrument(skip(self), fields(client_id = %self.client_id))]
    async fn request_token(&self) -> ImportResult<TokenResponse> {
        let body = ClientCredentialsRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            audience: &self.audience,
            scope: IMPORT_SCOPES,
        };

        let response = self
            .http
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImportError::AuthenticationFailed(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::AuthenticationFailed(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ImportError::AuthenticationFailed(format!("Invalid token response: {e}"))
        })?;

        debug!(expires_in = token.expires_in, "Acquired access token");

        Ok(token)
    }
}
