//! Optional due date and the deadline predicates derived from it.

use super::TaskDomainError;
use crate::kernel::domain::ValueObject;
use chrono::{DateTime, Days, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar due date of a task, or no due date.
///
/// Deadline checks work at day granularity against a reference date. The
/// clock-based variants take "today" to be the clock's current UTC date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use taskwright::task::domain::DueDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
/// let due = DueDate::parse("2026-03-12").expect("valid due date");
/// assert!(due.is_due_soon_on(today));
/// assert!(!due.is_overdue_on(today));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(Option<NaiveDate>);

impl DueDate {
    /// Number of days ahead that still counts as "due soon".
    pub const DUE_SOON_WINDOW_DAYS: u64 = 3;

    /// Creates a due date on the given day.
    #[must_use]
    pub const fn on(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Returns the absence of a due date.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Parses a `YYYY-MM-DD` date or an RFC 3339 timestamp. Blank input
    /// yields [`DueDate::none`]. Timestamps keep only their UTC date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDate`] when the input is neither.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::none());
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::on(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| Self::on(timestamp.with_timezone(&Utc).date_naive()))
            .map_err(|_| TaskDomainError::InvalidDate(value.to_owned()))
    }

    /// Returns the current UTC date according to `clock`.
    #[must_use]
    pub fn today(clock: &impl Clock) -> NaiveDate {
        clock.utc().date_naive()
    }

    /// Returns the due day, if any.
    #[must_use]
    pub const fn date(self) -> Option<NaiveDate> {
        self.0
    }

    /// Returns `true` when a due date is set.
    #[must_use]
    pub const fn has_value(self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` when the due day is before `today`.
    #[must_use]
    pub fn is_overdue_on(self, today: NaiveDate) -> bool {
        self.0.is_some_and(|date| date < today)
    }

    /// Returns `true` when the due day is `today`.
    #[must_use]
    pub fn is_due_today_on(self, today: NaiveDate) -> bool {
        self.0.is_some_and(|date| date == today)
    }

    /// Returns `true` when the due day falls between `today` and
    /// [`Self::DUE_SOON_WINDOW_DAYS`] days later, inclusive.
    #[must_use]
    pub fn is_due_soon_on(self, today: NaiveDate) -> bool {
        let horizon = today.checked_add_days(Days::new(Self::DUE_SOON_WINDOW_DAYS));
        self.0
            .is_some_and(|date| date >= today && horizon.is_none_or(|limit| date <= limit))
    }

    /// Clock-based form of [`Self::is_overdue_on`].
    #[must_use]
    pub fn is_overdue(self, clock: &impl Clock) -> bool {
        self.is_overdue_on(Self::today(clock))
    }

    /// Clock-based form of [`Self::is_due_today_on`].
    #[must_use]
    pub fn is_due_today(self, clock: &impl Clock) -> bool {
        self.is_due_today_on(Self::today(clock))
    }

    /// Clock-based form of [`Self::is_due_soon_on`].
    #[must_use]
    pub fn is_due_soon(self, clock: &impl Clock) -> bool {
        self.is_due_soon_on(Self::today(clock))
    }
}

impl ValueObject for DueDate {}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        Self::on(date)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => Ok(()),
        }
    }
}
