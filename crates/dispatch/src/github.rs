//! GitHub Actions `workflow_dispatch` client.
//!
//! Wraps the GitHub REST endpoint that queues a workflow run
//! (`POST /repos/{repo}/actions/workflows/{workflow}/dispatches`) using
//! [`reqwest`]. GitHub answers 204 with an empty body on success.

use std::time::Duration;

use crate::WorkflowDispatcher;

/// HTTP request timeout for a single dispatch attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sent as `User-Agent`; the GitHub API rejects requests without one.
const USER_AGENT: &str = concat!("comicd/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Settings for reaching the GitHub Actions API.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base API URL (default `https://api.github.com`; overridable so
    /// tests can point at a local server).
    pub api_base: String,
    /// Personal access token with `workflow` scope.
    pub token: String,
    /// `owner/repo` holding the download workflow.
    pub repo: String,
    /// Workflow file name, e.g. `download.yml`.
    pub workflow: String,
    /// Git ref the workflow runs on.
    pub ref_name: String,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the workflow dispatch layer.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitHub returned a non-2xx status code.
    #[error("GitHub API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the GitHub Actions workflow-dispatch endpoint.
pub struct GithubActionsClient {
    client: reqwest::Client,
    config: GithubConfig,
}

impl GithubActionsClient {
    /// Create a new client with its own connection pool.
    pub fn new(config: GithubConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GithubConfig) -> Self {
        Self { client, config }
    }

    /// URL of the workflow-dispatch endpoint for the configured repo.
    fn dispatch_url(&self) -> String {
        format!(
            "{}/repos/{}/actions/workflows/{}/dispatches",
            self.config.api_base, self.config.repo, self.config.workflow
        )
    }

    /// Ensure the response has a success status code, or surface the
    /// status and body text as a [`DispatchError::Api`].
    async fn ensure_success(response: reqwest::Response) -> Result<(), DispatchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DispatchError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkflowDispatcher for GithubActionsClient {
    async fn dispatch(&self, album_id: &str, task_id: &str) -> Result<(), DispatchError> {
        let body = serde_json::json!({
            "ref": self.config.ref_name,
            "inputs": {
                "album_id": album_id,
                "task_id": task_id,
            },
        });

        let response = self
            .client
            .post(self.dispatch_url())
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&body)
            .send()
            .await?;

        Self::ensure_success(response).await?;

        tracing::info!(album_id, task_id, "Workflow dispatch accepted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
