//! Application services for task lifecycle orchestration.

mod commands;
mod lifecycle;

pub use commands::{
    AssignTaskCommand, AssigneeInput, CompleteTaskCommand, CreateTaskCommand, DeleteTaskCommand,
    DueDateChange, GetTaskQuery, GetTasksByAssigneeQuery, GetTasksByProjectQuery, TagChange,
    TagTaskCommand, TaskActionCommand, TaskCommandError, TaskCommandResult, UpdateTaskCommand,
};
pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
