//! In-memory adapters for task management.

mod task;

pub use task::{ConcurrencyMode, InMemoryRepositoryConfig, InMemoryTaskRepository};
