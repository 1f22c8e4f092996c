use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::models::{
    ExecutionRequest, ExecutionResult, ExecutionToken, STATUS_PROCESSING, TokenState,
};

/// Client interface to the remote execution service.
///
/// One token per submitted request, order preserved in both directions.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Dispatch a batch of execution requests, returning one token per request.
    async fn submit_batch(
        &self,
        requests: &[ExecutionRequest],
    ) -> Result<Vec<ExecutionToken>, ExecutorError>;

    /// Query the current state of the given tokens.
    async fn poll_tokens(
        &self,
        tokens: &[ExecutionToken],
    ) -> Result<Vec<TokenState>, ExecutorError>;
}

#[derive(Serialize)]
struct BatchSubmitBody<'a> {
    submissions: &'a [ExecutionRequest],
}

#[derive(Deserialize)]
struct TokenEntry {
    token: String,
}

#[derive(Deserialize)]
struct BatchPollBody {
    submissions: Vec<PollEntry>,
}

/// One entry of a batch poll response. The service reports CPU time in
/// seconds as a decimal string.
#[derive(Deserialize)]
struct PollEntry {
    status_id: i32,
    time: Option<String>,
    memory: Option<i64>,
    stdout: Option<String>,
    stderr: Option<String>,
}

impl From<PollEntry> for TokenState {
    fn from(entry: PollEntry) -> Self {
        if entry.status_id <= STATUS_PROCESSING {
            return TokenState::InProgress;
        }
        TokenState::Finished(ExecutionResult {
            status_id: entry.status_id,
            time: entry.time.and_then(|t| t.parse().ok()),
            memory: entry.memory,
            stdout: entry.stdout,
            stderr: entry.stderr,
        })
    }
}

/// HTTP client for the execution service.
pub struct HttpExecutionClient {
    http: reqwest::Client,
    config: ExecutorConfig,
}

impl HttpExecutionClient {
    pub fn new(config: ExecutorConfig) -> Result<Self, ExecutorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { http, config })
    }

    fn batch_url(&self) -> String {
        format!(
            "{}/submissions/batch",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.header("X-Auth-Token", token),
            None => request,
        }
    }

    /// Turn a non-success response into a service error.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ExecutorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        Err(ExecutorError::Service {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl ExecutionService for HttpExecutionClient {
    async fn submit_batch(
        &self,
        requests: &[ExecutionRequest],
    ) -> Result<Vec<ExecutionToken>, ExecutorError> {
        let url = format!("{}?base64_encoded=false", self.batch_url());
        let response = self
            .with_auth(self.http.post(&url))
            .json(&BatchSubmitBody {
                submissions: requests,
            })
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let entries: Vec<TokenEntry> = response.json().await?;
        if entries.len() != requests.len() {
            return Err(ExecutorError::BatchMismatch {
                expected: requests.len(),
                actual: entries.len(),
            });
        }

        debug!(tokens = entries.len(), "Batch dispatched");
        Ok(entries
            .into_iter()
            .map(|entry| ExecutionToken(entry.token))
            .collect())
    }

    async fn poll_tokens(
        &self,
        tokens: &[ExecutionToken],
    ) -> Result<Vec<TokenState>, ExecutorError> {
        let joined = tokens
            .iter()
            .map(|t| t.0.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}?tokens={}&fields=status_id,time,memory,stdout,stderr&base64_encoded=false",
            self.batch_url(),
            joined
        );
        let response = self.with_auth(self.http.get(&url)).send().await?;
        let response = Self::check_status(response).await?;

        let body: BatchPollBody = response.json().await?;
        if body.submissions.len() != tokens.len() {
            return Err(ExecutorError::BatchMismatch {
                expected: tokens.len(),
                actual: body.submissions.len(),
            });
        }

        Ok(body.submissions.into_iter().map(TokenState::from).collect())
    }
}
