//! Handler for the workflow completion callback.
//!
//! The external CI workflow reports back exactly once per task, with
//! either `completed` plus album metadata or `failed` plus an error
//! message. Anything else is rejected.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use comicd_core::task::AlbumInfo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /callback`, sent by the workflow's final step.
#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    pub task_id: String,
    /// Reported status. Kept as a raw string so anything other than the
    /// two terminal values is a 400, not a deserialization error.
    pub status: String,
    /// Album metadata, expected when `status` is `completed`.
    #[serde(default)]
    pub album_info: Option<AlbumInfo>,
    /// Error message, expected when `status` is `failed`.
    #[serde(default)]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /callback
// ---------------------------------------------------------------------------

/// Apply a terminal status reported by the workflow.
///
/// Unknown task ids are 404 (a restart may have emptied the registry while
/// a workflow was still running); replays against a finished task are 409.
pub async fn workflow_callback(
    State(state): State<AppState>,
    Json(input): Json<CallbackRequest>,
) -> AppResult<impl IntoResponse> {
    let task = match input.status.as_str() {
        "completed" => {
            state
                .registry
                .complete(&input.task_id, input.album_info)
                .await?
        }
        "failed" => {
            let error = input
                .error
                .unwrap_or_else(|| "Workflow reported failure without detail".to_string());
            state.registry.fail(&input.task_id, error).await?
        }
        other => {
            return Err(AppError::BadRequest(format!(
                "Callback status must be 'completed' or 'failed', got '{other}'"
            )));
        }
    };

    tracing::info!(
        task_id = %task.task_id,
        album_id = %task.album_id,
        status = ?task.status,
        "Task status updated from workflow callback",
    );

    Ok(Json(DataResponse { data: task }))
}
