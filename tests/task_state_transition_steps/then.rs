//! Then steps for task state transition BDD scenarios.

use super::world::TaskTransitionWorld;
use rstest_bdd_macros::then;
use taskwright::{
    kernel::domain::DomainEvent,
    task::{
        domain::{TaskDomainError, TaskStatus},
        services::TaskLifecycleError,
    },
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }

    Ok(())
}

#[then(r#"the published events are "{names}""#)]
fn published_events_are(world: &TaskTransitionWorld, names: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    let events = world.publisher.events();
    let actual: Vec<&str> = events.iter().map(DomainEvent::event_type).collect();

    eyre::ensure!(
        actual == expected,
        "expected events {expected:?}, got {actual:?}"
    );
    Ok(())
}

#[then("the command fails with an illegal transition error")]
fn command_fails_with_illegal_transition(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::IllegalTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected IllegalTransition error, got {result:?}"
        ));
    }

    Ok(())
}

#[then("the command fails with an aggregate complete error")]
fn command_fails_with_aggregate_complete(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::AggregateComplete { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected AggregateComplete error, got {result:?}"
        ));
    }

    Ok(())
}

#[then("the task has no completion timestamp")]
fn task_has_no_completion_timestamp(world: &TaskTransitionWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    eyre::ensure!(
        task.completed_at().is_none(),
        "completion timestamp should be cleared"
    );
    Ok(())
}
