//! In-memory task registry.
//!
//! Process-lifetime map from task id to [`Task`]. There is no persistence
//! and no cross-instance coordination; a restart forgets everything. All
//! mutation goes through the methods here so the duplicate-submission and
//! terminal-transition rules hold everywhere.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::task::{validate_album_id, AlbumInfo, Task, TaskStatus};

/// Shared registry of download tasks, keyed by task id.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RwLock<HashMap<String, Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `Pending` task for an album.
    ///
    /// Rejects the submission with `Conflict` when a non-terminal task for
    /// the same album already exists; a completed or failed album may be
    /// resubmitted.
    pub async fn create(&self, album_id: &str) -> Result<Task, CoreError> {
        let album_id = validate_album_id(album_id)?;

        let mut tasks = self.tasks.write().await;

        let already_active = tasks
            .values()
            .any(|t| t.album_id == album_id && !t.status.is_terminal());
        if already_active {
            return Err(CoreError::Conflict(format!(
                "Album {album_id} is already in the download queue"
            )));
        }

        let task = Task::new(album_id, Utc::now());
        tasks.insert(task.task_id.clone(), task.clone());
        Ok(task)
    }

    /// Look up a single task by id.
    pub async fn get(&self, task_id: &str) -> Result<Task, CoreError> {
        self.tasks
            .read()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "Task",
                id: task_id.to_string(),
            })
    }

    /// All tasks, newest first.
    pub async fn list(&self) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        all
    }

    /// Number of tracked tasks.
    pub async fn count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Delete a task record.
    ///
    /// Used to roll back a submission whose outbound dispatch failed, so a
    /// phantom `Pending` task does not block resubmission forever.
    pub async fn remove(&self, task_id: &str) -> Result<(), CoreError> {
        self.tasks
            .write()
            .await
            .remove(task_id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound {
                entity: "Task",
                id: task_id.to_string(),
            })
    }

    /// Mark a task completed, recording the album metadata from the
    /// workflow callback.
    pub async fn complete(
        &self,
        task_id: &str,
        album_info: Option<AlbumInfo>,
    ) -> Result<Task, CoreError> {
        self.finish(task_id, |task| {
            task.status = TaskStatus::Completed;
            task.progress = 100;
            task.album_info = album_info;
        })
        .await
    }

    /// Mark a task failed, recording the workflow's error message.
    pub async fn fail(&self, task_id: &str, error: String) -> Result<Task, CoreError> {
        self.finish(task_id, |task| {
            task.status = TaskStatus::Failed;
            task.error = Some(error);
        })
        .await
    }

    /// Apply a terminal transition under the write lock.
    ///
    /// Unknown ids are `NotFound`; a second transition on an already
    /// terminal task is `Conflict` (callback replay).
    async fn finish<F>(&self, task_id: &str, apply: F) -> Result<Task, CoreError>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(task_id).ok_or_else(|| CoreError::NotFound {
            entity: "Task",
            id: task_id.to_string(),
        })?;

        if task.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Task {task_id} already finished"
            )));
        }

        apply(task);
        task.end_time = Some(Utc::now());
        Ok(task.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
