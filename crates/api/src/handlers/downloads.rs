//! Handlers for download task submission and status queries.
//!
//! Submission creates an in-memory task and triggers the external download
//! workflow; the status endpoints feed the front end's polling loop.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

/// Body of `POST /downloads`. The field is camelCase on the wire because
/// that is what the front end has always sent.
#[derive(Debug, Deserialize)]
pub struct CreateDownloadRequest {
    #[serde(rename = "albumId")]
    pub album_id: String,
}

/// Payload returned after a download task is accepted.
#[derive(Debug, Serialize)]
pub struct DownloadCreatedResponse {
    pub task_id: String,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// POST /downloads
// ---------------------------------------------------------------------------

/// Submit an album for download.
///
/// Creates a `Pending` task, then asks the external workflow to do the
/// real work. If the dispatch call fails the task is removed again so the
/// album is not stuck behind a phantom record.
pub async fn create_download(
    State(state): State<AppState>,
    Json(input): Json<CreateDownloadRequest>,
) -> AppResult<impl IntoResponse> {
    let task = state.registry.create(&input.album_id).await?;

    if let Err(err) = state
        .dispatcher
        .dispatch(&task.album_id, &task.task_id)
        .await
    {
        // Roll back before reporting: the workflow never started.
        let _ = state.registry.remove(&task.task_id).await;
        return Err(err.into());
    }

    tracing::info!(
        task_id = %task.task_id,
        album_id = %task.album_id,
        "Download task submitted",
    );

    let response = DownloadCreatedResponse {
        task_id: task.task_id,
        message: "Download task submitted",
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

// ---------------------------------------------------------------------------
// GET /downloads
// ---------------------------------------------------------------------------

/// List all tasks, newest first.
pub async fn list_downloads(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tasks = state.registry.list().await;
    Ok(Json(DataResponse { data: tasks }))
}

// ---------------------------------------------------------------------------
// GET /downloads/{task_id}
// ---------------------------------------------------------------------------

/// Get a single task by id. This is the endpoint the front end polls.
pub async fn get_download(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let task = state.registry.get(&task_id).await?;
    Ok(Json(DataResponse { data: task }))
}
