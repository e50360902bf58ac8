//! In-memory task repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{PersistedTaskData, ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Version checking applied by [`InMemoryTaskRepository::save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Last writer wins. Assumes a single writer.
    #[default]
    Unchecked,
    /// Replacing a stored task requires the incoming version to be exactly
    /// one more than the stored version.
    Optimistic,
}

/// Configuration for [`InMemoryTaskRepository`].
///
/// # Examples
///
/// ```
/// use taskwright::task::adapters::memory::{ConcurrencyMode, InMemoryRepositoryConfig};
///
/// let config: InMemoryRepositoryConfig =
///     serde_json::from_str(r#"{"concurrency":"optimistic"}"#).expect("valid config");
/// assert_eq!(config, InMemoryRepositoryConfig::optimistic());
/// assert_eq!(
///     InMemoryRepositoryConfig::default().concurrency,
///     ConcurrencyMode::Unchecked
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryRepositoryConfig {
    /// Version checking mode for saves.
    pub concurrency: ConcurrencyMode,
}

impl InMemoryRepositoryConfig {
    /// Configuration that rejects stale saves.
    #[must_use]
    pub const fn optimistic() -> Self {
        Self {
            concurrency: ConcurrencyMode::Optimistic,
        }
    }
}

/// Thread-safe in-memory task repository.
///
/// Stores the persistent snapshot of each task keyed by its identifier and
/// rebuilds aggregates on read. Query methods scan every stored task and
/// return matches ordered by creation time.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    config: InMemoryRepositoryConfig,
    state: Arc<RwLock<HashMap<String, PersistedTaskData>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository without version checks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository with the given configuration.
    #[must_use]
    pub fn with_config(config: InMemoryRepositoryConfig) -> Self {
        Self {
            config,
            state: Arc::default(),
        }
    }

    /// Returns the repository configuration.
    #[must_use]
    pub const fn config(&self) -> InMemoryRepositoryConfig {
        self.config
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every stored task.
    pub fn clear(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns every stored task ordered by creation time.
    #[must_use]
    pub fn all(&self) -> Vec<Task> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        collect_matching(&state, |_| true)
    }

    fn read_state(
        &self,
    ) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<String, PersistedTaskData>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<String, PersistedTaskData>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn query(&self, predicate: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(collect_matching(&state, predicate))
    }
}

/// Rebuilds stored tasks, keeps those matching `predicate`, and orders them
/// by creation time then identifier.
fn collect_matching(
    state: &HashMap<String, PersistedTaskData>,
    predicate: impl Fn(&Task) -> bool,
) -> Vec<Task> {
    let mut matches: Vec<Task> = state
        .values()
        .cloned()
        .map(Task::reconstitute)
        .filter(|task| predicate(task))
        .collect();
    matches.sort_by(|left, right| {
        left.created_at()
            .cmp(&right.created_at())
            .then_with(|| left.id().as_str().cmp(right.id().as_str()))
    });
    matches
}

/// Checks that `incoming` is the direct successor of the stored version.
fn check_version(
    stored: Option<&PersistedTaskData>,
    incoming: &Task,
) -> TaskRepositoryResult<()> {
    let Some(current) = stored else {
        return Ok(());
    };
    if current.version.checked_add(1) == Some(incoming.version()) {
        return Ok(());
    }
    Err(TaskRepositoryError::ConcurrentModification {
        task_id: incoming.id().clone(),
        expected: incoming.version().saturating_sub(1),
        actual: current.version,
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if self.config.concurrency == ConcurrencyMode::Optimistic {
            check_version(state.get(task.id().as_str()), task)?;
        }
        state.insert(task.id().as_str().to_owned(), task.snapshot());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.get(id.as_str()).cloned().map(Task::reconstitute))
    }

    async fn exists(&self, id: &TaskId) -> TaskRepositoryResult<bool> {
        let state = self.read_state()?;
        Ok(state.contains_key(id.as_str()))
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        state.remove(id.as_str());
        Ok(())
    }

    async fn find_by_project_id(&self, project_id: &ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.query(|task| task.project_id() == Some(project_id))
    }

    async fn find_by_assignee_id(&self, user_id: &str) -> TaskRepositoryResult<Vec<Task>> {
        self.query(|task| task.assignee().user_id() == Some(user_id))
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.query(|task| task.status() == status)
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.query(|task| task.is_overdue_on(today))
    }

    async fn find_due_today(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.query(|task| task.due_date().is_due_today_on(today) && !task.status().is_complete())
    }

    async fn find_by_tag(&self, tag: &str) -> TaskRepositoryResult<Vec<Task>> {
        let normalized = tag.trim().to_lowercase();
        self.query(|task| task.tags().contains(&normalized))
    }
}
