//! Repository port for task persistence and read-model queries.

use crate::task::domain::{ProjectId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations store the persistent state of a task only. Tasks
/// returned from any method carry no pending domain events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts or replaces a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ConcurrentModification`] when the
    /// implementation enforces optimistic concurrency and the stored version
    /// is not the one the task was loaded at.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns `true` when a task with the identifier is stored.
    async fn exists(&self, id: &TaskId) -> TaskRepositoryResult<bool>;

    /// Removes a task. Removing an absent task succeeds.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Returns all tasks in a project.
    async fn find_by_project_id(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks assigned to a user.
    async fn find_by_assignee_id(&self, user_id: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks with the given status.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns incomplete tasks whose due date is before `today`.
    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns incomplete tasks due on `today`.
    async fn find_due_today(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks carrying `tag`, which is trimmed and lower-cased before
    /// matching.
    async fn find_by_tag(&self, tag: &str) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The stored version does not match the version the caller loaded.
    #[error("task {task_id} was modified concurrently: stored version {actual}, expected {expected}")]
    ConcurrentModification {
        /// Task whose save was rejected.
        task_id: TaskId,
        /// Version the incoming change was based on.
        expected: u64,
        /// Version currently stored.
        actual: u64,
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
