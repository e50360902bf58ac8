//! Domain event contract and its serializable envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable record of something significant that happened in the domain.
pub trait DomainEvent: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Stable event name used for routing, e.g. `TaskCreated`.
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Transport-neutral form of a domain event.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use serde::Serialize;
/// use taskwright::kernel::domain::{DomainEvent, EventEnvelope};
///
/// #[derive(Debug, Clone, Serialize)]
/// struct Pinged {
///     at: DateTime<Utc>,
/// }
///
/// impl DomainEvent for Pinged {
///     fn event_type(&self) -> &'static str {
///         "Pinged"
///     }
///
///     fn occurred_at(&self) -> DateTime<Utc> {
///         self.at
///     }
/// }
///
/// let envelope = EventEnvelope::from_event(&Pinged { at: Utc::now() })
///     .expect("event serializes");
/// assert_eq!(envelope.event_type(), "Pinged");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    event_type: String,
    occurred_at: DateTime<Utc>,
    payload: Value,
}

impl EventEnvelope {
    /// Wraps a domain event, serializing it as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the event cannot be serialized.
    pub fn from_event<E>(event: &E) -> Result<Self, serde_json::Error>
    where
        E: DomainEvent + Serialize,
    {
        Ok(Self {
            event_type: event.event_type().to_owned(),
            occurred_at: event.occurred_at(),
            payload: serde_json::to_value(event)?,
        })
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Returns when the wrapped event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the serialized event.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }
}
