//! Command and query inputs for the task lifecycle service.
//!
//! Every type checks its required fields when constructed, before any
//! service logic runs. Domain rules such as title length are enforced later
//! by the value objects themselves.

use crate::task::domain::{Priority, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing commands and queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskCommandError {
    /// A required field was empty after trimming.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Result type for command construction.
pub type TaskCommandResult<T> = Result<T, TaskCommandError>;

fn required(value: impl Into<String>, field: &'static str) -> TaskCommandResult<String> {
    let raw = value.into();
    if raw.trim().is_empty() {
        return Err(TaskCommandError::MissingField(field));
    }
    Ok(raw)
}

/// Raw assignee details carried by commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeInput {
    /// External user identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Request to create a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskCommand {
    title: String,
    created_by: String,
    description: Option<String>,
    project_id: Option<String>,
    priority: Option<Priority>,
    due_date: Option<NaiveDate>,
    assignee: Option<AssigneeInput>,
}

impl CreateTaskCommand {
    /// Creates a command with the required title and author.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when either value is blank.
    pub fn new(
        title: impl Into<String>,
        created_by: impl Into<String>,
    ) -> TaskCommandResult<Self> {
        Ok(Self {
            title: required(title, "title")?,
            created_by: required(created_by, "created by")?,
            description: None,
            project_id: None,
            priority: None,
            due_date: None,
            assignee: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Places the task in a project.
    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub fn with_assignee(
        mut self,
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.assignee = Some(AssigneeInput {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
        });
        self
    }

    /// Returns the requested title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns who creates the task.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the description, if given.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the raw project identifier, if given.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Returns the priority, if given.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the due date, if given.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the assignee details, if given.
    #[must_use]
    pub const fn assignee(&self) -> Option<&AssigneeInput> {
        self.assignee.as_ref()
    }
}

/// Request to assign a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskCommand {
    task_id: String,
    assignee: AssigneeInput,
    assigned_by: String,
}

impl AssignTaskCommand {
    /// Creates an assignment command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when any value is blank.
    pub fn new(
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        assigned_by: impl Into<String>,
    ) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
            assignee: AssigneeInput {
                user_id: required(user_id, "assignee user id")?,
                name: required(name, "assignee name")?,
                email: required(email, "assignee email")?,
            },
            assigned_by: required(assigned_by, "assigned by")?,
        })
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the assignee details.
    #[must_use]
    pub const fn assignee(&self) -> &AssigneeInput {
        &self.assignee
    }

    /// Returns who makes the assignment.
    #[must_use]
    pub fn assigned_by(&self) -> &str {
        &self.assigned_by
    }
}

/// Request to complete a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTaskCommand {
    task_id: String,
    completed_by: String,
}

impl CompleteTaskCommand {
    /// Creates a completion command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when either value is blank.
    pub fn new(
        task_id: impl Into<String>,
        completed_by: impl Into<String>,
    ) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
            completed_by: required(completed_by, "completed by")?,
        })
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns who completes the task.
    #[must_use]
    pub fn completed_by(&self) -> &str {
        &self.completed_by
    }
}

/// Request to start, submit, cancel, or reopen a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionCommand {
    task_id: String,
    actor: String,
}

impl TaskActionCommand {
    /// Creates an action command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when either value is blank.
    pub fn new(task_id: impl Into<String>, actor: impl Into<String>) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
            actor: required(actor, "actor")?,
        })
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns who performs the action.
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }
}

/// Due date change carried by [`UpdateTaskCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateChange {
    /// Set the due date to this day.
    Set(NaiveDate),
    /// Clear the due date.
    Remove,
}

/// Request to update several task fields at once.
///
/// Fields left unset are not touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskCommand {
    task_id: String,
    updated_by: String,
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    due_date: Option<DueDateChange>,
}

impl UpdateTaskCommand {
    /// Creates an update command that changes nothing yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when either value is blank.
    pub fn new(
        task_id: impl Into<String>,
        updated_by: impl Into<String>,
    ) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
            updated_by: required(updated_by, "updated by")?,
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: None,
        })
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Changes the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, change: DueDateChange) -> Self {
        self.due_date = Some(change);
        self
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns who updates the task.
    #[must_use]
    pub fn updated_by(&self) -> &str {
        &self.updated_by
    }

    /// Returns the new title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the due date change, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDateChange> {
        self.due_date
    }

    /// Returns `true` when at least one field is set.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.priority.is_some()
            || self.due_date.is_some()
    }
}

/// Whether a [`TagTaskCommand`] adds or removes its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagChange {
    /// Add the tag.
    Add,
    /// Remove the tag.
    Remove,
}

/// Request to add or remove a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTaskCommand {
    task_id: String,
    tag: String,
    change: TagChange,
}

impl TagTaskCommand {
    /// Creates a command adding `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when either value is blank.
    pub fn add(task_id: impl Into<String>, tag: impl Into<String>) -> TaskCommandResult<Self> {
        Self::new(task_id, tag, TagChange::Add)
    }

    /// Creates a command removing `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when either value is blank.
    pub fn remove(task_id: impl Into<String>, tag: impl Into<String>) -> TaskCommandResult<Self> {
        Self::new(task_id, tag, TagChange::Remove)
    }

    fn new(
        task_id: impl Into<String>,
        tag: impl Into<String>,
        change: TagChange,
    ) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
            tag: required(tag, "tag")?,
            change,
        })
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Returns the tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns whether the tag is added or removed.
    #[must_use]
    pub const fn change(&self) -> TagChange {
        self.change
    }
}

/// Request to delete a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTaskCommand {
    task_id: String,
}

impl DeleteTaskCommand {
    /// Creates a deletion command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when the id is blank.
    pub fn new(task_id: impl Into<String>) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
        })
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Query for a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTaskQuery {
    task_id: String,
}

impl GetTaskQuery {
    /// Creates the query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when the id is blank.
    pub fn new(task_id: impl Into<String>) -> TaskCommandResult<Self> {
        Ok(Self {
            task_id: required(task_id, "task id")?,
        })
    }

    /// Returns the raw task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

/// Query for all tasks of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTasksByProjectQuery {
    project_id: String,
}

impl GetTasksByProjectQuery {
    /// Creates the query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when the id is blank.
    pub fn new(project_id: impl Into<String>) -> TaskCommandResult<Self> {
        Ok(Self {
            project_id: required(project_id, "project id")?,
        })
    }

    /// Returns the raw project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}

/// Query for all tasks assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTasksByAssigneeQuery {
    user_id: String,
}

impl GetTasksByAssigneeQuery {
    /// Creates the query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingField`] when the id is blank.
    pub fn new(user_id: impl Into<String>) -> TaskCommandResult<Self> {
        Ok(Self {
            user_id: required(user_id, "user id")?,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
