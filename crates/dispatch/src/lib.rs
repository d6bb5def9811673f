//! Outbound workflow dispatch.
//!
//! The actual album download runs in an external CI workflow; this crate
//! owns the HTTP call that triggers it. The [`WorkflowDispatcher`] trait is
//! the seam the API server depends on, so integration tests can substitute
//! a stub instead of talking to GitHub.

pub mod github;

pub use github::{DispatchError, GithubActionsClient, GithubConfig};

/// Asks an external automation platform to start one album download.
#[async_trait::async_trait]
pub trait WorkflowDispatcher: Send + Sync {
    /// Trigger the download workflow for `album_id`, tagging the run with
    /// `task_id` so the workflow's callback can address our task record.
    async fn dispatch(&self, album_id: &str, task_id: &str) -> Result<(), DispatchError>;
}
