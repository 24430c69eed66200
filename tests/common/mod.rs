//! Shared helpers for integration tests against a mocked Management API

#![allow(dead_code)]

use auth0_import::api::ApiClient;
use auth0_import::{ClientSettings, ImportSettings, Importer};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const CLIENT_ID: &str = "m2m-client";
pub const CONNECTION_NAME: &str = "Username-Password-Authentication";
pub const CONNECTION_ID: &str = "con_0000000000000001";

/// Mock server plus a scratch directory for user files
pub struct TestContext {
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/v2", self.server.uri())
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.server.uri())
    }

    pub fn client(&self) -> ApiClient {
        let settings = ClientSettings::new(self.api_url(), self.token_url(), CLIENT_ID, "secret")
            .with_timeout_secs(5);
        ApiClient::new(&settings).expect("Failed to create client")
    }

    /// Importer polling every 10ms
    pub fn importer(&self) -> Importer {
        Importer::new(
            self.client(),
            CLIENT_ID,
            ImportSettings::default().with_poll_interval(Duration::from_millis(10)),
        )
    }

    /// Write a users file of roughly `size` bytes and return its path
    pub fn write_users_file(&self, name: &str, size: usize) -> PathBuf {
        let mut content = String::from(r#"[{"email":"jane@example.com","email_verified":true}]"#);
        if content.len() < size {
            content.push_str(&" ".repeat(size - content.len()));
        }
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write users file");
        path
    }

    pub fn pattern(&self, suffix: &str) -> String {
        format!("{}/{}", self.dir.path().display(), suffix)
    }

    pub async fn mock_token(&self) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "test-token",
                "token_type": "Bearer",
                "expires_in": 86400,
                "scope": "create:users read:connections"
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_connection(&self, strategy: &str, enabled_clients: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/api/v2/connections"))
            .and(query_param("name", CONNECTION_NAME))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": CONNECTION_ID,
                "name": CONNECTION_NAME,
                "strategy": strategy,
                "enabled_clients": enabled_clients
            }])))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_valid_connection(&self) {
        self.mock_connection("auth0", &[CLIENT_ID, "other-client"])
            .await;
    }

    /// Accept every upload, answering with the given job ids in order
    pub async fn mock_submissions(&self, job_ids: &[&str]) {
        for (index, id) in job_ids.iter().enumerate() {
            Mock::given(method("POST"))
                .and(path("/api/v2/jobs/users-imports"))
                .respond_with(ResponseTemplate::new(201).set_body_json(pending_job(id)))
                .up_to_n_times(1)
                .with_priority((index + 1) as u8)
                .mount(&self.server)
                .await;
        }
    }

    pub async fn mock_completed(&self, id: &str, inserted: u64, failed: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/jobs/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(completed_job(
                id, inserted, failed,
            )))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_errors(&self, id: &str, errors: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/jobs/{id}/errors")))
            .respond_with(ResponseTemplate::new(200).set_body_json(errors))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_no_errors(&self, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2/jobs/{id}/errors")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .expect("Request recording is enabled")
    }

    /// Requests matching a method and exact path
    pub async fn count_requests(&self, http_method: &str, request_path: &str) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
            .count()
    }
}

pub fn pending_job(id: &str) -> Value {
    json!({
        "status": "pending",
        "type": "users_import",
        "created_at": "2026-10-19T09:00:00.000Z",
        "id": id,
        "connection_id": CONNECTION_ID
    })
}

pub fn completed_job(id: &str, inserted: u64, failed: u64) -> Value {
    json!({
        "status": "completed",
        "type": "users_import",
        "created_at": "2026-10-19T09:00:00.000Z",
        "id": id,
        "connection_id": CONNECTION_ID,
        "summary": {
            "failed": failed,
            "updated": 0,
            "inserted": inserted,
            "total": inserted + failed
        }
    })
}

pub fn error_record(email: &str) -> Value {
    json!({
        "user": {"email": email},
        "errors": [{
            "code": "DUPLICATED_USER",
            "message": "The user already exist",
            "path": "email"
        }]
    })
}
