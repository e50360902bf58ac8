//! Task lifecycle orchestration: load, mutate, save, publish.

use super::commands::{
    AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, DeleteTaskCommand, DueDateChange,
    GetTaskQuery, GetTasksByAssigneeQuery, GetTasksByProjectQuery, TagChange, TagTaskCommand,
    TaskActionCommand, TaskCommandError, UpdateTaskCommand,
};
use crate::kernel::{
    domain::AggregateRoot,
    ports::{EventPublishError, EventPublishResult, EventPublisher},
};
use crate::task::{
    domain::{
        Assignee, CreateTaskParams, DueDate, ProjectId, Task, TaskDomainError, TaskEvent, TaskId,
        TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Command construction failed.
    #[error(transparent)]
    Command(#[from] TaskCommandError),
    /// Domain validation or a state rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Event publication failed after the task was saved.
    ///
    /// `task` still buffers the unpublished events; hand it to
    /// [`TaskLifecycleService::publish_pending_events`] to retry.
    #[error("task {} was saved but its events were not published: {source}", task.id())]
    Publish {
        /// The saved task with its events still pending.
        task: Box<Task>,
        /// Why publication failed.
        source: EventPublishError,
    },
    /// No task exists with the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl TaskLifecycleError {
    /// Returns the saved task whose events are still unpublished, when this
    /// is a [`TaskLifecycleError::Publish`] error.
    #[must_use]
    pub fn into_unpublished_task(self) -> Option<Task> {
        match self {
            Self::Publish { task, .. } => Some(*task),
            _ => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every mutating handler loads the task, applies one aggregate operation,
/// bumps the version once, saves, and then publishes the buffered events as
/// one ordered batch.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher<TaskEvent>,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: EventPublisher<TaskEvent>,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            publisher,
            clock,
        }
    }

    /// Creates a task and publishes its `TaskCreated` event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails, the repository
    /// rejects the task, or publication fails.
    pub async fn create_task(&self, command: CreateTaskCommand) -> TaskLifecycleResult<Task> {
        let mut params = CreateTaskParams::new(command.title(), command.created_by());
        if let Some(description) = command.description() {
            params = params.with_description(description);
        }
        if let Some(project_id) = command.project_id() {
            params = params.with_project(ProjectId::new(project_id)?);
        }
        if let Some(priority) = command.priority() {
            params = params.with_priority(priority);
        }
        if let Some(due_on) = command.due_date() {
            params = params.with_due_date(DueDate::on(due_on));
        }
        if let Some(input) = command.assignee() {
            params = params.with_assignee(Assignee::assigned(
                &input.user_id,
                &input.name,
                &input.email,
            )?);
        }

        let task = Task::create(params, &*self.clock)?;
        self.repository.save(&task).await?;
        let task = self.publish_saved(task).await?;
        debug!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Assigns a task to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] when validation, persistence, or
    /// publication fails.
    pub async fn assign_task(&self, command: AssignTaskCommand) -> TaskLifecycleResult<Task> {
        let input = command.assignee();
        self.apply(command.task_id(), |task, clock| {
            task.assign(
                &input.user_id,
                &input.name,
                &input.email,
                command.assigned_by(),
                clock,
            )
        })
        .await
    }

    /// Marks a task done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] when the task is already complete or
    /// persistence or publication fails.
    pub async fn complete_task(&self, command: CompleteTaskCommand) -> TaskLifecycleResult<Task> {
        self.apply(command.task_id(), |task, clock| {
            task.complete(command.completed_by(), clock)
        })
        .await
    }

    /// Applies every field set on the command as a single change.
    ///
    /// Nothing is saved when any field is rejected. A command with no fields
    /// set returns the stored task untouched: no save, no version bump.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] when validation, persistence, or
    /// publication fails.
    pub async fn update_task(&self, command: UpdateTaskCommand) -> TaskLifecycleResult<Task> {
        if !command.has_changes() {
            let task_id = TaskId::new(command.task_id())?;
            return self
                .repository
                .find_by_id(&task_id)
                .await?
                .ok_or_else(|| TaskLifecycleError::NotFound(task_id.clone()));
        }
        self.apply(command.task_id(), |task, clock| {
            if let Some(title) = command.title() {
                task.update_title(title, clock)?;
            }
            if let Some(description) = command.description() {
                task.update_description(description, clock)?;
            }
            if let Some(priority) = command.priority() {
                task.update_priority(priority, clock)?;
            }
            match command.due_date() {
                Some(DueDateChange::Set(due_on)) => task.set_due_date(due_on, clock)?,
                Some(DueDateChange::Remove) => task.remove_due_date(clock)?,
                None => {}
            }
            // Status goes last: the other mutators reject a complete task.
            if let Some(status) = command.status() {
                task.change_status(status, command.updated_by(), clock)?;
            }
            Ok(())
        })
        .await
    }

    /// Starts work on a `Todo` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] for an illegal transition or a
    /// persistence or publication failure.
    pub async fn start_task(&self, command: TaskActionCommand) -> TaskLifecycleResult<Task> {
        self.apply(command.task_id(), |task, clock| {
            task.start(command.actor(), clock)
        })
        .await
    }

    /// Submits an `InProgress` task for review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] for an illegal transition or a
    /// persistence or publication failure.
    pub async fn submit_task_for_review(
        &self,
        command: TaskActionCommand,
    ) -> TaskLifecycleResult<Task> {
        self.apply(command.task_id(), |task, clock| {
            task.submit_for_review(command.actor(), clock)
        })
        .await
    }

    /// Cancels an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] when the task is already complete or
    /// persistence or publication fails.
    pub async fn cancel_task(&self, command: TaskActionCommand) -> TaskLifecycleResult<Task> {
        self.apply(command.task_id(), |task, clock| {
            task.cancel(command.actor(), clock)
        })
        .await
    }

    /// Returns a done or cancelled task to `Todo`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] when the task is not complete or
    /// persistence or publication fails.
    pub async fn reopen_task(&self, command: TaskActionCommand) -> TaskLifecycleResult<Task> {
        self.apply(command.task_id(), |task, clock| {
            task.reopen(command.actor(), clock)
        })
        .await
    }

    /// Adds or removes a tag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, or
    /// another [`TaskLifecycleError`] when the task is complete or
    /// persistence or publication fails.
    pub async fn tag_task(&self, command: TagTaskCommand) -> TaskLifecycleResult<Task> {
        self.apply(command.task_id(), |task, clock| match command.change() {
            TagChange::Add => task.add_tag(command.tag(), clock),
            TagChange::Remove => task.remove_tag(command.tag(), clock),
        })
        .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task or
    /// [`TaskLifecycleError::Repository`] when deletion fails.
    pub async fn delete_task(&self, command: DeleteTaskCommand) -> TaskLifecycleResult<()> {
        let task_id = TaskId::new(command.task_id())?;
        if !self.repository.exists(&task_id).await? {
            return Err(TaskLifecycleError::NotFound(task_id));
        }
        self.repository.delete(&task_id).await?;
        debug!(%task_id, "deleted task");
        Ok(())
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the identifier is invalid or the
    /// lookup fails.
    pub async fn get_task(&self, query: GetTaskQuery) -> TaskLifecycleResult<Option<Task>> {
        let task_id = TaskId::new(query.task_id())?;
        Ok(self.repository.find_by_id(&task_id).await?)
    }

    /// Lists the tasks of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the identifier is invalid or the
    /// lookup fails.
    pub async fn tasks_in_project(
        &self,
        query: GetTasksByProjectQuery,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let project_id = ProjectId::new(query.project_id())?;
        Ok(self.repository.find_by_project_id(&project_id).await?)
    }

    /// Lists the tasks assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn tasks_assigned_to(
        &self,
        query: GetTasksByAssigneeQuery,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_assignee_id(query.user_id()).await?)
    }

    /// Lists the tasks in `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn tasks_with_status(&self, status: TaskStatus) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_status(status).await?)
    }

    /// Lists incomplete tasks whose due date is before the clock's date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn overdue_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let today = DueDate::today(&*self.clock);
        Ok(self.repository.find_overdue(today).await?)
    }

    /// Lists incomplete tasks due on the clock's date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn tasks_due_today(&self) -> TaskLifecycleResult<Vec<Task>> {
        let today = DueDate::today(&*self.clock);
        Ok(self.repository.find_due_today(today).await?)
    }

    /// Lists the tasks carrying `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn tasks_tagged(&self, tag: &str) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_tag(tag).await?)
    }

    /// Publishes the task's buffered events as one batch, then clears them.
    ///
    /// On failure the events stay buffered so the caller may retry.
    ///
    /// # Errors
    ///
    /// Returns the [`EventPublishError`] when the publisher rejects the
    /// batch.
    pub async fn publish_pending_events(&self, task: &mut Task) -> EventPublishResult<()> {
        let events = task.pending_events();
        if events.is_empty() {
            return Ok(());
        }
        let count = events.len();
        self.publisher.publish_all(events).await?;
        task.clear_events();
        debug!(task_id = %task.id(), count, "published task events");
        Ok(())
    }

    async fn publish_saved(&self, mut task: Task) -> TaskLifecycleResult<Task> {
        match self.publish_pending_events(&mut task).await {
            Ok(()) => Ok(task),
            Err(source) => Err(TaskLifecycleError::Publish {
                task: Box::new(task),
                source,
            }),
        }
    }

    async fn apply<F>(&self, raw_id: &str, operation: F) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let task_id = TaskId::new(raw_id)?;
        let mut task = self
            .repository
            .find_by_id(&task_id)
            .await?
            .ok_or_else(|| TaskLifecycleError::NotFound(task_id.clone()))?;

        operation(&mut task, &*self.clock)?;
        task.increment_version();
        self.repository.save(&task).await?;
        let task = self.publish_saved(task).await?;
        debug!(%task_id, version = task.version(), status = %task.status(), "updated task");
        Ok(task)
    }
}
