//! HTTP client for the TaskHub API.
//!
//! One function per server operation. Every failure is normalized into
//! [`ClientError`] so callers can handle the three cases exhaustively
//! instead of sniffing error shapes.

use std::time::Duration;

use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use taskhub_tasks::model::{CreateTaskRequest, Task, UpdateTaskRequest};

/// Fixed per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Normalized client-side failure.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server replied with a failure envelope.
    #[error("{message} (status {status})")]
    Response { status: u16, message: String },

    /// The request was sent but no usable response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be constructed at all.
    #[error("request setup failed: {0}")]
    Setup(String),
}

/// The `{success, message?, error?, data?}` wrapper every endpoint returns.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<T>,
}

/// Human-readable message for a failure envelope.
fn failure_message(status: u16, message: Option<String>, error: Option<String>) -> String {
    match (message, error) {
        (Some(m), Some(e)) => format!("{m}: {e}"),
        (Some(m), None) => m,
        (None, Some(e)) => e,
        (None, None) => format!("request failed with status {status}"),
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_builder() {
        ClientError::Setup(e.to_string())
    } else {
        ClientError::Network(e.to_string())
    }
}

/// Blocking HTTP client bound to one server.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Operations, one per endpoint
    // -----------------------------------------------------------------------

    /// GET /api/tasks — the full list, newest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.send(Method::GET, "/api/tasks", None::<&()>)
    }

    /// GET /api/tasks/{id}
    pub fn get_task(&self, id: &str) -> Result<Task, ClientError> {
        self.send(Method::GET, &format!("/api/tasks/{id}"), None::<&()>)
    }

    /// POST /api/tasks
    pub fn create_task(&self, req: &CreateTaskRequest) -> Result<Task, ClientError> {
        self.send(Method::POST, "/api/tasks", Some(req))
    }

    /// PUT /api/tasks/{id} — only the fields present in `req` are sent.
    pub fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> Result<Task, ClientError> {
        self.send(Method::PUT, &format!("/api/tasks/{id}"), Some(req))
    }

    /// Completion toggle — an update carrying only the `completed` field.
    pub fn set_completed(&self, id: &str, completed: bool) -> Result<Task, ClientError> {
        self.update_task(
            id,
            &UpdateTaskRequest {
                completed: Some(completed),
                ..Default::default()
            },
        )
    }

    /// DELETE /api/tasks/{id} — returns the removed record's snapshot.
    pub fn delete_task(&self, id: &str) -> Result<Task, ClientError> {
        self.send(Method::DELETE, &format!("/api/tasks/{id}"), None::<&()>)
    }

    /// GET /health — connectivity probe for `taskhub status`.
    pub fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.http.get(&url).send().map_err(transport_error)?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Response {
                status: status.as_u16(),
                message: format!("health check failed with status {status}"),
            })
        }
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    fn send<T: DeserializeOwned + Default>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(b) = body {
            request = request.json(b);
        }

        let resp = request.send().map_err(transport_error)?;
        let status = resp.status();

        let envelope: Envelope<T> = resp
            .json()
            .map_err(|e| ClientError::Network(format!("invalid response body: {e}")))?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Response {
                status: status.as_u16(),
                message: failure_message(status.as_u16(), envelope.message, envelope.error),
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Network("response envelope missing data".into()))
    }
}
