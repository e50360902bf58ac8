//! Taskwright: a task-management domain built from aggregates, value
//! objects, and domain events.
//!
//! # Architecture
//!
//! Taskwright follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and event delivery
//! - **Adapters**: In-process implementations of those ports
//!
//! # Modules
//!
//! - [`kernel`]: Entity, value-object, aggregate, and domain-event traits
//!   plus the event publisher port
//! - [`task`]: The task aggregate, its repository, and lifecycle service

pub mod kernel;
pub mod task;
