//! Recording event publisher for tests and local wiring.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::kernel::{
    domain::DomainEvent,
    ports::{EventPublishError, EventPublishResult, EventPublisher},
};

/// Thread-safe publisher that records every event it receives, in order.
#[derive(Debug, Clone)]
pub struct InMemoryEventPublisher<E> {
    published: Arc<RwLock<Vec<E>>>,
}

impl<E: DomainEvent> InMemoryEventPublisher<E> {
    /// Creates a publisher with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self {
            published: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Returns a copy of all events published so far.
    #[must_use]
    pub fn events(&self) -> Vec<E> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the event types published so far.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(DomainEvent::event_type)
            .collect()
    }

    /// Forgets all recorded events.
    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<E: DomainEvent> Default for InMemoryEventPublisher<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for InMemoryEventPublisher<E> {
    async fn publish(&self, event: &E) -> EventPublishResult<()> {
        let mut published = self.published.write().map_err(|err| {
            EventPublishError::transport(std::io::Error::other(err.to_string()))
        })?;
        published.push(event.clone());
        Ok(())
    }

    async fn publish_all(&self, events: &[E]) -> EventPublishResult<()> {
        let mut published = self.published.write().map_err(|err| {
            EventPublishError::transport(std::io::Error::other(err.to_string()))
        })?;
        published.extend_from_slice(events);
        Ok(())
    }
}
