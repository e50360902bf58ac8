//! Event publisher port used to hand buffered domain events to the outside
//! world.

use crate::kernel::domain::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event publication.
pub type EventPublishResult<T> = Result<T, EventPublishError>;

/// Publishes domain events without prescribing a transport.
#[async_trait]
pub trait EventPublisher<E: DomainEvent>: Send + Sync {
    /// Publishes a single event.
    ///
    /// # Errors
    ///
    /// Returns an [`EventPublishError`] when the transport rejects the event.
    async fn publish(&self, event: &E) -> EventPublishResult<()>;

    /// Publishes events as one ordered batch.
    ///
    /// Implementations deliver the events in slice order.
    ///
    /// # Errors
    ///
    /// Returns an [`EventPublishError`] when the transport rejects the
    /// batch.
    async fn publish_all(&self, events: &[E]) -> EventPublishResult<()>;
}

/// Errors returned by event publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum EventPublishError {
    /// The publisher no longer accepts events.
    #[error("event publisher is closed")]
    Closed,

    /// Transport-layer failure.
    #[error("event transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventPublishError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
