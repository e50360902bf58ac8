//! Unit tests for the task bounded context.


use crate::task::domain::{CreateTaskParams, Task, TaskDomainError};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a fixed instant so due-date rules are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on the given day.
    pub(super) fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid fixed clock instant");
        Self(instant)
    }

    pub(super) fn today(self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub(super) fn new_task(title: &str, clock: &impl Clock) -> Result<Task, TaskDomainError> {
    Task::create(CreateTaskParams::new(title, "creator"), clock)
}
