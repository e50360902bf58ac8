//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.
//! Event publication goes through the kernel's
//! [`EventPublisher`](crate::kernel::ports::EventPublisher) port.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use repository::MockTaskRepository;
