//! HTTP client wrapper for the Management API

use crate::api::auth::{ClientCredentials, TokenProvider};
use crate::api::credentials::CredentialManager;
use crate::config::ClientSettings;
use crate::error::{ImportError, ImportResult};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// API client for authenticated Management API requests
///
/// Every request goes through [`ApiClient::request`], which waits for the
/// current access token and resolves the path against the tenant base URL.
/// Nothing is retried here; transport and HTTP errors reach the caller as is.
pub struct ApiClient {
    http: Client,
    api_url: String,
    credentials: CredentialManager,
}

impl ApiClient {
    /// Create a client authenticating with the client credentials grant
    pub fn new(settings: &ClientSettings) -> ImportResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ImportError::Network(format!("Failed to create HTTP client: {e}")))?;

        let provider: Arc<dyn TokenProvider> = Arc::new(ClientCredentials::new(http.clone(), settings));

        Ok(Self::with_credentials(
            http,
            &settings.api_url,
            CredentialManager::new(provider),
        ))
    }

    /// Create a client around an existing credential manager
    pub fn with_credentials(http: Client, api_url: &str, credentials: CredentialManager) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Get the credential manager
    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    /// Get the API base URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Absolute URL for a path relative to the API base
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Build an authenticated request for a relative path
    pub async fn request(&self, method: Method, path: &str) -> ImportResult<RequestBuilder> {
        let token = self.credentials.acquire().await?;
        let url = self.url(path);
        debug!(%method, %url, "API request");
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Make an authenticated GET request and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ImportResult<T> {
        let response = self
            .request(Method::GET, path)
            .await?
            .query(query)
            .send()
            .await?;

        decode_json(response).await
    }

    /// Make an authenticated GET request; an empty response yields `T::default()`
    pub async fn get_json_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &str,
    ) -> ImportResult<T> {
        let response = self.request(Method::GET, path).await?.send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(T::default());
        }
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        serde_json::from_slice(&body).map_err(|e| {
            ImportError::Network(format!("Invalid response body: {e}"))
        })
    }

    /// Make an authenticated multipart POST request and decode the JSON response
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ImportResult<T> {
        let response = self
            .request(Method::POST, path)
            .await?
            .multipart(form)
            .send()
            .await?;

        decode_json(response).await
    }
}

/// Turn a non-success response into [`ImportError::Api`]
async fn check_status(response: Response) -> ImportResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ImportError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> ImportResult<T> {
    check_status(response).await?.json().await.map_err(Into::into)
}
