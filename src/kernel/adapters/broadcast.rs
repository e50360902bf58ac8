//! Fan-out event publisher backed by a tokio broadcast channel.
//!
//! Events are held in memory only. Subscribers that fall behind by more than
//! the channel capacity observe a lag and lose the oldest events.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use crate::kernel::{
    domain::DomainEvent,
    ports::{EventPublishResult, EventPublisher},
};

/// Publisher that forwards every event to all current subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher<E> {
    sender: broadcast::Sender<E>,
}

impl<E: DomainEvent> BroadcastEventPublisher<E> {
    /// Channel capacity used by [`Self::with_default_capacity`].
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Creates a publisher buffering up to `capacity` events per
    /// subscriber. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Creates a publisher with [`Self::DEFAULT_CAPACITY`].
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }

    /// Subscribes to all events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn send(&self, event: &E) {
        // A send only fails when nobody is listening.
        match self.sender.send(event.clone()) {
            Ok(receivers) => debug!(
                event_type = event.event_type(),
                receivers, "broadcast domain event"
            ),
            Err(_) => debug!(
                event_type = event.event_type(),
                "no subscribers for domain event"
            ),
        }
    }
}

impl<E: DomainEvent> Default for BroadcastEventPublisher<E> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl<E: DomainEvent> EventPublisher<E> for BroadcastEventPublisher<E> {
    async fn publish(&self, event: &E) -> EventPublishResult<()> {
        self.send(event);
        Ok(())
    }

    async fn publish_all(&self, events: &[E]) -> EventPublishResult<()> {
        for event in events {
            self.send(event);
        }
        Ok(())
    }
}
