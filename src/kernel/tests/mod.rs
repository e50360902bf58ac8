//! Unit tests for the shared kernel.


use crate::kernel::domain::DomainEvent;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// Minimal event used to exercise kernel types without a bounded context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct NoteEvent {
    pub(super) note: String,
    pub(super) occurred_at: DateTime<Utc>,
}

impl NoteEvent {
    pub(super) fn new(note: &str) -> Self {
        Self {
            note: note.to_owned(),
            occurred_at: Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

impl DomainEvent for NoteEvent {
    fn event_type(&self) -> &'static str {
        "NoteTaken"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
