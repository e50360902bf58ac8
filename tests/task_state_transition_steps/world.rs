//! Shared world state for task state transition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwright::{
    kernel::adapters::InMemoryEventPublisher,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskEvent},
        services::{TaskLifecycleError, TaskLifecycleService},
    },
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryEventPublisher<TaskEvent>, DefaultClock>;

/// Scenario world for task transition behaviour tests.
pub struct TaskTransitionWorld {
    pub service: TestTaskService,
    pub publisher: Arc<InMemoryEventPublisher<TaskEvent>>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskTransitionWorld {
    /// Creates a world with no task yet.
    #[must_use]
    pub fn new() -> Self {
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&publisher),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            publisher,
            task: None,
            last_result: None,
        }
    }

    /// Returns the identifier of the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<String, eyre::Report> {
        self.task
            .as_ref()
            .map(|task| task.id().as_str().to_owned())
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records a command outcome, keeping the latest successful task state.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskTransitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskTransitionWorld {
    TaskTransitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
