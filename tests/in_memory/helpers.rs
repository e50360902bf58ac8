//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use mockable::DefaultClock;
use rstest::fixture;
use taskwright::{
    kernel::adapters::InMemoryEventPublisher,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{DueDate, Task, TaskEvent},
        services::{CreateTaskCommand, TaskLifecycleService},
    },
};

/// Service wired to in-memory adapters and the system clock.
pub type TestService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryEventPublisher<TaskEvent>, DefaultClock>;

/// Service together with handles on its adapters.
pub struct Harness {
    /// Repository shared with the service.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Publisher shared with the service.
    pub publisher: Arc<InMemoryEventPublisher<TaskEvent>>,
    /// Service under test.
    pub service: TestService,
}

impl Harness {
    /// Creates a task with the given title.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is invalid or the service fails.
    pub async fn create(&self, title: &str) -> eyre::Result<Task> {
        self.create_with(CreateTaskCommand::new(title, "creator")?)
            .await
    }

    /// Runs a prepared create command.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails.
    pub async fn create_with(&self, command: CreateTaskCommand) -> eyre::Result<Task> {
        Ok(self.service.create_task(command).await?)
    }
}

/// Provides a fresh harness for each test.
#[fixture]
pub fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let publisher = Arc::new(InMemoryEventPublisher::new());
    let service = TaskLifecycleService::new(
        Arc::clone(&repository),
        Arc::clone(&publisher),
        Arc::new(DefaultClock),
    );
    Harness {
        repository,
        publisher,
        service,
    }
}

/// Provides today's date according to the system clock.
#[fixture]
pub fn today() -> NaiveDate {
    DueDate::today(&DefaultClock)
}

/// Returns `today` shifted by `offset` days in either direction.
#[must_use]
pub fn shifted(today: NaiveDate, offset: i64) -> NaiveDate {
    let days = Days::new(offset.unsigned_abs());
    let shifted = if offset.is_negative() {
        today.checked_sub_days(days)
    } else {
        today.checked_add_days(days)
    };
    shifted.unwrap_or(today)
}

/// Returns the titles of `tasks`, in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
