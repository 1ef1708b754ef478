//! Repository port for task persistence, listing, and guarded updates.

use crate::task::domain::{Task, TaskId, TaskQuery, TaskRevision, TaskState, TaskVisibility};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the visible tasks that survive `query`, oldest first.
    async fn list(
        &self,
        visibility: &TaskVisibility,
        query: &TaskQuery,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists `task` only if the stored record is still at `expected`.
    ///
    /// Both the state and the version must match, so a write computed from
    /// a stale snapshot fails even when the task has since returned to the
    /// same state. The check and the write form one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::StateConflict`] when the stored revision is
    /// no longer `expected`.
    async fn update_if_current(
        &self,
        task: &Task,
        expected: TaskRevision,
    ) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored task moved on from the loaded revision before the write
    /// landed.
    #[error("task {task_id} changed since it was loaded as {expected:?}")]
    StateConflict {
        /// Task identifier.
        task_id: TaskId,
        /// State the write was conditioned on.
        expected: TaskState,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
