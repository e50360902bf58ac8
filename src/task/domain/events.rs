//! Domain events raised by the task aggregate.

use super::{Assignee, ProjectId, TaskId, TaskStatus};
use crate::kernel::domain::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something that happened to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    task_id: TaskId,
    occurred_at: DateTime<Utc>,
    kind: TaskEventKind,
}

/// What happened, with the facts needed to describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEventKind {
    /// A task was created.
    Created {
        /// Title at creation time.
        title: String,
        /// Owning project, if any.
        project_id: Option<ProjectId>,
        /// Who created the task.
        created_by: String,
    },
    /// A task was assigned to a user.
    Assigned {
        /// The new assignee.
        assignee: Assignee,
        /// Who made the assignment.
        assigned_by: String,
    },
    /// A task entered [`TaskStatus::Done`].
    Completed {
        /// Who completed the task.
        completed_by: String,
    },
    /// A task moved between statuses.
    StatusChanged {
        /// Status before the change.
        from: TaskStatus,
        /// Status after the change.
        to: TaskStatus,
        /// Who changed the status.
        changed_by: String,
    },
}

impl TaskEvent {
    /// Creates an event for `task_id`.
    #[must_use]
    pub const fn new(task_id: TaskId, kind: TaskEventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            occurred_at,
            kind,
        }
    }

    /// Returns the task the event belongs to.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the event details.
    #[must_use]
    pub const fn kind(&self) -> &TaskEventKind {
        &self.kind
    }
}

impl DomainEvent for TaskEvent {
    fn event_type(&self) -> &'static str {
        match self.kind {
            TaskEventKind::Created { .. } => "TaskCreated",
            TaskEventKind::Assigned { .. } => "TaskAssigned",
            TaskEventKind::Completed { .. } => "TaskCompleted",
            TaskEventKind::StatusChanged { .. } => "TaskStatusChanged",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
