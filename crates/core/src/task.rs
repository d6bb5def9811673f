//! Task model: status lifecycle, album metadata, and task-id generation.
//!
//! A task tracks one download request from submission to the terminal
//! callback. Records live only in process memory (see
//! [`registry`](crate::registry)); nothing here touches storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of a download task.
///
/// `Pending` until the external workflow reports back; `Completed` and
/// `Failed` are terminal, so polling clients stop once they see either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Whether this status ends the task lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

// ---------------------------------------------------------------------------
// Album metadata
// ---------------------------------------------------------------------------

/// Album metadata reported by the workflow on successful completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub id: String,
    pub name: String,
    pub author: String,
    pub page_count: i64,
}

// ---------------------------------------------------------------------------
// Task record
// ---------------------------------------------------------------------------

/// One download request's in-memory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Registry key, `{album_id}_{YYYYMMDD_HHMMSS}`.
    pub task_id: String,
    /// Album the user asked for.
    pub album_id: String,
    pub status: TaskStatus,
    /// Integer percentage. Stays 0 until the workflow reports progress;
    /// the current workflow only reports terminal states.
    pub progress: u8,
    pub start_time: DateTime<Utc>,
    /// Set when the task reaches a terminal status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Present once the task completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_info: Option<AlbumInfo>,
    /// Present once the task failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Task {
    /// Create a fresh `Pending` record for an album, stamping the task id
    /// from the creation time.
    pub fn new(album_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            task_id: make_task_id(album_id, now),
            album_id: album_id.to_string(),
            status: TaskStatus::Pending,
            progress: 0,
            start_time: now,
            end_time: None,
            album_info: None,
            error: None,
        }
    }
}

/// Build a task id from the album id and a timestamp.
///
/// Format: `{album_id}_{YYYYMMDD_HHMMSS}` (UTC). Second resolution is
/// enough because duplicate submissions for the same album are rejected
/// while a task is still pending.
pub fn make_task_id(album_id: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", album_id, now.format("%Y%m%d_%H%M%S"))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a user-submitted album id.
///
/// Album ids are numeric on the upstream site, but we only require
/// non-empty ASCII alphanumerics so test fixtures and future id schemes
/// pass through. Returns the trimmed id on success.
pub fn validate_album_id(album_id: &str) -> Result<&str, CoreError> {
    let trimmed = album_id.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Album id must not be empty".to_string(),
        ));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(format!(
            "Album id must be alphanumeric, got: '{trimmed}'"
        )));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
