//! Domain model for task management.
//!
//! Value objects validate themselves on construction, and the [`Task`]
//! aggregate owns them, enforces the status state machine, and buffers the
//! events it raises until a service publishes them.

mod assignee;
mod due_date;
mod error;
mod events;
mod ids;
mod status;
mod task;
mod text;

pub use assignee::Assignee;
pub use due_date::DueDate;
pub use error::TaskDomainError;
pub use events::{TaskEvent, TaskEventKind};
pub use ids::{ProjectId, TaskId};
pub use status::{Priority, TaskStatus};
pub use task::{CreateTaskParams, PersistedTaskData, Task};
pub use text::{TaskDescription, TaskTitle};
