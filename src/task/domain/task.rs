//! Task aggregate root and its status state machine.

use super::{
    Assignee, DueDate, Priority, ProjectId, TaskDescription, TaskDomainError, TaskEvent,
    TaskEventKind, TaskId, TaskStatus, TaskTitle,
};
use crate::kernel::domain::{AggregateRoot, Entity, EventLog};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Parameter object for [`Task::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskParams {
    title: String,
    created_by: String,
    description: Option<String>,
    project_id: Option<ProjectId>,
    priority: Option<Priority>,
    due_date: DueDate,
    assignee: Assignee,
}

impl CreateTaskParams {
    /// Creates parameters with the required title and author.
    #[must_use]
    pub fn new(title: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created_by: created_by.into(),
            description: None,
            project_id: None,
            priority: None,
            due_date: DueDate::none(),
            assignee: Assignee::unassigned(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Places the task in a project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the priority. Defaults to [`Priority::Medium`].
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = assignee;
        self
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date.
    pub due_date: DueDate,
    /// Persisted assignee.
    pub assignee: Assignee,
    /// Persisted project, if any.
    pub project_id: Option<ProjectId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted normalized tags, in insertion order.
    pub tags: Vec<String>,
    /// Persisted subtask identifiers, in insertion order.
    pub subtasks: Vec<TaskId>,
    /// Persisted aggregate version.
    pub version: u64,
}

/// Task aggregate root.
///
/// Equality is identity equality: two `Task` values are equal when they
/// carry the same [`TaskId`], whatever their other state. Compare
/// [`Task::snapshot`] results to compare full state.
///
/// Every mutator either succeeds completely or returns an error without
/// touching any field. Once a task is done or cancelled, every mutator other
/// than [`Task::reopen`] fails with [`TaskDomainError::AggregateComplete`].
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    priority: Priority,
    due_date: DueDate,
    assignee: Assignee,
    project_id: Option<ProjectId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    tags: Vec<String>,
    subtasks: Vec<TaskId>,
    version: u64,
    events: EventLog<TaskEvent>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::Todo`] and records a
    /// `TaskCreated` event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitle`] or
    /// [`TaskDomainError::DescriptionTooLong`] when the text fields fail
    /// validation.
    pub fn create(params: CreateTaskParams, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = TaskTitle::new(&params.title)?;
        let description = params
            .description
            .as_deref()
            .map_or_else(|| Ok(TaskDescription::empty()), TaskDescription::new)?;
        let timestamp = clock.utc();
        let id = TaskId::generate();

        let mut events = EventLog::new();
        events.record(TaskEvent::new(
            id.clone(),
            TaskEventKind::Created {
                title: title.as_str().to_owned(),
                project_id: params.project_id.clone(),
                created_by: params.created_by,
            },
            timestamp,
        ));

        Ok(Self {
            id,
            title,
            description,
            status: TaskStatus::Todo,
            priority: params.priority.unwrap_or_default(),
            due_date: params.due_date,
            assignee: params.assignee,
            project_id: params.project_id,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
            tags: Vec::new(),
            subtasks: Vec::new(),
            version: 0,
            events,
        })
    }

    /// Reconstructs a task from persisted storage. Raises no events.
    #[must_use]
    pub fn reconstitute(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            assignee: data.assignee,
            project_id: data.project_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            tags: data.tags,
            subtasks: data.subtasks,
            version: data.version,
            events: EventLog::new(),
        }
    }

    /// Captures the persistent state of the task, without pending events.
    #[must_use]
    pub fn snapshot(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            assignee: self.assignee.clone(),
            project_id: self.project_id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
            tags: self.tags.clone(),
            subtasks: self.subtasks.clone(),
            version: self.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DueDate {
        self.due_date
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &Assignee {
        &self.assignee
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task entered a terminal status, if it is in one.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the normalized tags in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the subtask identifiers in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[TaskId] {
        &self.subtasks
    }

    /// Returns the aggregate version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns events raised since the buffer was last cleared.
    #[must_use]
    pub fn pending_events(&self) -> &[TaskEvent] {
        self.events.as_slice()
    }

    /// Returns `true` when the due date is before `today` and the task is not
    /// complete.
    #[must_use]
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.due_date.is_overdue_on(today) && !self.status.is_complete()
    }

    /// Clock-based form of [`Task::is_overdue_on`].
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.is_overdue_on(DueDate::today(clock))
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task or
    /// [`TaskDomainError::InvalidTitle`] for an invalid title.
    pub fn update_title(
        &mut self,
        title: impl AsRef<str>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.title = TaskTitle::new(title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task or
    /// [`TaskDomainError::DescriptionTooLong`] for an oversized description.
    pub fn update_description(
        &mut self,
        description: impl AsRef<str>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.description = TaskDescription::new(description)?;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to `new_status`.
    ///
    /// Does nothing when `new_status` is the current status. Otherwise
    /// records a `TaskStatusChanged` event, followed by `TaskCompleted` when
    /// entering [`TaskStatus::Done`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] when the task is
    /// complete; use [`Task::reopen`] instead.
    pub fn change_status(
        &mut self,
        new_status: TaskStatus,
        changed_by: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.apply_status(new_status, changed_by, clock);
        Ok(())
    }

    /// Starts work on a `Todo` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task or
    /// [`TaskDomainError::IllegalTransition`] when the task is not `Todo`.
    pub fn start(&mut self, started_by: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.ensure_status(TaskStatus::Todo, TaskStatus::InProgress)?;
        self.apply_status(TaskStatus::InProgress, started_by, clock);
        Ok(())
    }

    /// Submits an `InProgress` task for review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task or
    /// [`TaskDomainError::IllegalTransition`] when the task is not
    /// `InProgress`.
    pub fn submit_for_review(
        &mut self,
        submitted_by: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.ensure_status(TaskStatus::InProgress, TaskStatus::InReview)?;
        self.apply_status(TaskStatus::InReview, submitted_by, clock);
        Ok(())
    }

    /// Marks the task done from any active status. Review is not required.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] when the task is
    /// already complete.
    pub fn complete(
        &mut self,
        completed_by: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.apply_status(TaskStatus::Done, completed_by, clock);
        Ok(())
    }

    /// Cancels the task from any active status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] when the task is
    /// already complete.
    pub fn cancel(
        &mut self,
        cancelled_by: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.apply_status(TaskStatus::Cancelled, cancelled_by, clock);
        Ok(())
    }

    /// Returns a done or cancelled task to `Todo` and clears its completion
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::IllegalTransition`] when the task is not
    /// complete.
    pub fn reopen(
        &mut self,
        reopened_by: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.is_complete() {
            return Err(self.illegal_transition(TaskStatus::Todo));
        }
        self.apply_status(TaskStatus::Todo, reopened_by, clock);
        Ok(())
    }

    /// Assigns the task and records a `TaskAssigned` event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task or
    /// [`TaskDomainError::InvalidAssignee`] for invalid assignee details.
    pub fn assign(
        &mut self,
        user_id: &str,
        name: &str,
        email: &str,
        assigned_by: &str,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        let assignee = Assignee::assigned(user_id, name, email)?;
        let timestamp = clock.utc();
        self.assignee = assignee.clone();
        self.record(
            TaskEventKind::Assigned {
                assignee,
                assigned_by: assigned_by.to_owned(),
            },
            timestamp,
        );
        self.updated_at = timestamp;
        Ok(())
    }

    /// Removes the assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn unassign(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.assignee = Assignee::unassigned();
        self.touch(clock);
        Ok(())
    }

    /// Replaces the priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn update_priority(
        &mut self,
        priority: Priority,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.priority = priority;
        self.touch(clock);
        Ok(())
    }

    /// Sets the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn set_due_date(
        &mut self,
        due_on: NaiveDate,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.due_date = DueDate::on(due_on);
        self.touch(clock);
        Ok(())
    }

    /// Clears the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn remove_due_date(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.due_date = DueDate::none();
        self.touch(clock);
        Ok(())
    }

    /// Adds a tag, trimmed and lower-cased. Adding a tag the task already
    /// carries changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task or
    /// [`TaskDomainError::EmptyTag`] for a blank tag.
    pub fn add_tag(&mut self, tag: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        let normalized = normalize_tag(tag);
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTag);
        }
        if !self.tags.contains(&normalized) {
            self.tags.push(normalized);
            self.touch(clock);
        }
        Ok(())
    }

    /// Removes a tag after normalizing it. Removing an absent tag changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn remove_tag(&mut self, tag: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        let normalized = normalize_tag(tag);
        if let Some(position) = self.tags.iter().position(|existing| *existing == normalized) {
            self.tags.remove(position);
            self.touch(clock);
        }
        Ok(())
    }

    /// Appends a subtask reference. Adding a known subtask changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn add_subtask(
        &mut self,
        subtask_id: TaskId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        if !self.subtasks.contains(&subtask_id) {
            self.subtasks.push(subtask_id);
            self.touch(clock);
        }
        Ok(())
    }

    /// Removes a subtask reference. Removing an unknown subtask changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn remove_subtask(
        &mut self,
        subtask_id: &TaskId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        if let Some(position) = self.subtasks.iter().position(|id| id == subtask_id) {
            self.subtasks.remove(position);
            self.touch(clock);
        }
        Ok(())
    }

    /// Moves the task into `project_id`, or out of any project with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AggregateComplete`] for a complete task.
    pub fn move_to_project(
        &mut self,
        project_id: Option<ProjectId>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.project_id = project_id;
        self.touch(clock);
        Ok(())
    }

    fn ensure_not_complete(&self) -> Result<(), TaskDomainError> {
        if self.status.is_complete() {
            return Err(TaskDomainError::AggregateComplete {
                task_id: self.id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }

    fn ensure_status(
        &self,
        required: TaskStatus,
        target: TaskStatus,
    ) -> Result<(), TaskDomainError> {
        if self.status != required {
            return Err(self.illegal_transition(target));
        }
        Ok(())
    }

    fn illegal_transition(&self, target: TaskStatus) -> TaskDomainError {
        TaskDomainError::IllegalTransition {
            task_id: self.id.clone(),
            from: self.status,
            to: target,
        }
    }

    /// Applies a status change without guards. Callers check the state
    /// machine first.
    fn apply_status(&mut self, new_status: TaskStatus, changed_by: &str, clock: &impl Clock) {
        if new_status == self.status {
            return;
        }
        let previous = self.status;
        let timestamp = clock.utc();

        self.status = new_status;
        if new_status.is_complete() {
            self.completed_at = Some(timestamp);
        } else if previous.is_complete() {
            self.completed_at = None;
        }

        self.record(
            TaskEventKind::StatusChanged {
                from: previous,
                to: new_status,
                changed_by: changed_by.to_owned(),
            },
            timestamp,
        );
        if new_status.is_done() {
            self.record(
                TaskEventKind::Completed {
                    completed_by: changed_by.to_owned(),
                },
                timestamp,
            );
        }
        self.updated_at = timestamp;
    }

    fn record(&mut self, kind: TaskEventKind, occurred_at: DateTime<Utc>) {
        self.events
            .record(TaskEvent::new(self.id.clone(), kind, occurred_at));
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity_as(other)
    }
}

impl Eq for Task {}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Task {
    type Event = TaskEvent;

    fn version(&self) -> u64 {
        self.version
    }

    fn increment_version(&mut self) {
        self.version = self.version.saturating_add(1);
    }

    fn pending_events(&self) -> &[Self::Event] {
        self.events.as_slice()
    }

    fn clear_events(&mut self) {
        self.events.clear();
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        self.events.drain()
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
