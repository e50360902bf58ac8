//! In-process adapters for the kernel ports.

pub mod broadcast;
pub mod memory;

pub use broadcast::BroadcastEventPublisher;
pub use memory::InMemoryEventPublisher;
