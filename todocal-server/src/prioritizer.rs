//! Client for the remote task prioritization service.
//!
//! The service takes `{"tasks": [...]}` and answers with
//! `{"prioritized_tasks": ["<name>: <label>", ...]}`.

use std::error::Error as _;
use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use todocal_core::PrioritizedTask;

pub const DEFAULT_URL: &str = "http://localhost:8001/prioritize";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum PrioritizeError {
    #[error("Task prioritization service timed out.")]
    Timeout,

    #[error("Error from task prioritization service: {body}")]
    Upstream { status: u16, body: String },

    #[error("Could not connect to task prioritization service: {0}")]
    Unreachable(String),

    #[error("Invalid response from task prioritization service: {0}")]
    MalformedResponse(String),
}

impl PrioritizeError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PrioritizeError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            PrioritizeError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            PrioritizeError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PrioritizeError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        // Connect timeouts count as "unreachable"; only a slow answer is a timeout.
        if err.is_connect() {
            PrioritizeError::Unreachable(error_chain(&err))
        } else if err.is_timeout() {
            PrioritizeError::Timeout
        } else if err.is_decode() {
            PrioritizeError::MalformedResponse(error_chain(&err))
        } else {
            PrioritizeError::Unreachable(error_chain(&err))
        }
    }
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Serialize)]
struct PrioritizeRequest<'a> {
    tasks: &'a [String],
}

#[derive(Deserialize)]
struct PrioritizeResponse {
    #[serde(default)]
    prioritized_tasks: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct PrioritizationClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl Default for PrioritizationClient {
    fn default() -> Self {
        Self::new(DEFAULT_URL, DEFAULT_TIMEOUT)
    }
}

impl PrioritizationClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        PrioritizationClient {
            http: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ask the service to rank `tasks`. Attempted exactly once.
    pub async fn prioritize(&self, tasks: &[String]) -> Result<Vec<PrioritizedTask>, PrioritizeError> {
        debug!(url = %self.url, count = tasks.len(), "requesting prioritization");

        let result = self.send(tasks).await;
        if let Err(e) = &result {
            warn!(url = %self.url, error = %e, "prioritization failed");
        }
        result
    }

    async fn send(&self, tasks: &[String]) -> Result<Vec<PrioritizedTask>, PrioritizeError> {
        let response = self
            .http
            .post(&self.url)
            .json(&PrioritizeRequest { tasks })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(PrioritizeError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrioritizeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: PrioritizeResponse = response
            .json()
            .await
            .map_err(PrioritizeError::from_reqwest)?;

        body.prioritized_tasks
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                PrioritizedTask::parse(entry)
                    .map_err(|e| PrioritizeError::MalformedResponse(e.to_string()))
            })
            .collect()
    }
}
