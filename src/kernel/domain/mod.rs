//! Building blocks shared by every aggregate in the crate.

mod aggregate;
mod entity;
mod event;
mod value_object;

pub use aggregate::{AggregateRoot, EventLog};
pub use entity::Entity;
pub use event::{DomainEvent, EventEnvelope};
pub use value_object::ValueObject;
