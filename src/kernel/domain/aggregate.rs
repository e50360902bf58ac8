//! Aggregate roots and their buffered domain events.

use super::{DomainEvent, Entity};

/// Ordered buffer of domain events raised by an aggregate.
///
/// Events accumulate between a mutation and publication. The buffer is
/// owned by the aggregate value, so cloning an aggregate clones its pending
/// events and dropping it drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<E> {
    events: Vec<E>,
}

impl<E> EventLog<E> {
    /// Creates an empty event log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event after all previously recorded events.
    pub fn record(&mut self, event: E) {
        self.events.push(event);
    }

    /// Returns the buffered events in the order they were raised.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.events
    }

    /// Returns the number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` when no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards all buffered events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Removes and returns all buffered events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point to a cluster of domain objects that enforces their
/// invariants and records what happened to them.
pub trait AggregateRoot: Entity {
    /// Event type raised by this aggregate.
    type Event: DomainEvent;

    /// Returns the version used for optimistic concurrency checks.
    fn version(&self) -> u64;

    /// Advances the version by one.
    ///
    /// Called once per persisted change set, not once per mutation.
    fn increment_version(&mut self);

    /// Returns the events raised since the buffer was last cleared.
    fn pending_events(&self) -> &[Self::Event];

    /// Discards buffered events after they have been published.
    fn clear_events(&mut self);

    /// Removes and returns buffered events.
    fn take_events(&mut self) -> Vec<Self::Event>;
}
