//! Port contracts shared across bounded contexts.

pub mod publisher;

pub use publisher::{EventPublishError, EventPublishResult, EventPublisher};
