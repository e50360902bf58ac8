//! Error types for task domain validation and state transitions.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing task values or mutating a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// An identifier was empty after trimming.
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Which identifier was rejected.
        kind: &'static str,
    },

    /// The task title is empty or too long.
    #[error("invalid task title: {0}")]
    InvalidTitle(String),

    /// The task description exceeds the length limit.
    #[error("task description has {length} characters, limit is {max}")]
    DescriptionTooLong {
        /// Trimmed description length in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The assignee details are incomplete or malformed.
    #[error("invalid assignee: {0}")]
    InvalidAssignee(String),

    /// A string did not name a member of a closed enumeration.
    #[error("invalid {kind}: {value}")]
    InvalidEnumValue {
        /// Enumeration being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A due date could not be parsed.
    #[error("invalid date format: {0}")]
    InvalidDate(String),

    /// A tag was empty after trimming.
    #[error("tag must not be empty")]
    EmptyTag,

    /// The requested status change is not permitted from the current status.
    #[error("task {task_id} cannot move from {from} to {to}")]
    IllegalTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status at the time of the request.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The task is done or cancelled and only accepts `reopen`.
    #[error("task {task_id} is {status} and cannot be modified")]
    AggregateComplete {
        /// Task that rejected the change.
        task_id: TaskId,
        /// Terminal status of the task.
        status: TaskStatus,
    },
}
