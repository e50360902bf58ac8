//! In-memory integration tests for task lifecycle commands.

use super::helpers::{Harness, harness};
use eyre::{bail, ensure};
use rstest::rstest;
use taskwright::{
    kernel::domain::DomainEvent,
    task::{
        domain::{TaskDomainError, TaskEventKind, TaskStatus},
        services::{
            AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, GetTaskQuery,
            TaskActionCommand, TaskLifecycleError, UpdateTaskCommand,
        },
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_workflow_publishes_events_in_order(harness: Harness) -> eyre::Result<()> {
    let created = harness.create("Implement search").await?;
    let action = TaskActionCommand::new(created.id().as_str(), "dev")?;

    harness.service.start_task(action.clone()).await?;
    harness.service.submit_task_for_review(action).await?;
    let done = harness
        .service
        .complete_task(CompleteTaskCommand::new(created.id().as_str(), "reviewer")?)
        .await?;

    let events = harness.publisher.events();
    let types: Vec<&str> = events.iter().map(DomainEvent::event_type).collect();
    ensure!(
        types
            == [
                "TaskCreated",
                "TaskStatusChanged",
                "TaskStatusChanged",
                "TaskStatusChanged",
                "TaskCompleted",
            ],
        "unexpected event order: {types:?}"
    );
    let transitions: Vec<(TaskStatus, TaskStatus)> = events
        .iter()
        .filter_map(|event| match event.kind() {
            TaskEventKind::StatusChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    ensure!(
        transitions
            == [
                (TaskStatus::Todo, TaskStatus::InProgress),
                (TaskStatus::InProgress, TaskStatus::InReview),
                (TaskStatus::InReview, TaskStatus::Done),
            ]
    );
    ensure!(done.status() == TaskStatus::Done);
    ensure!(done.completed_at().is_some());
    ensure!(done.version() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_lowercases_email_and_rejects_bad_addresses(
    harness: Harness,
) -> eyre::Result<()> {
    let created = harness.create("Onboard contractor").await?;
    let id = created.id().as_str();

    let assigned = harness
        .service
        .assign_task(AssignTaskCommand::new(id, "u-1", "John", "JOHN@X.COM", "lead")?)
        .await?;
    ensure!(assigned.assignee().email() == Some("john@x.com"));

    let rejected = harness
        .service
        .assign_task(AssignTaskCommand::new(id, "u-2", "Jane", "not-an-email", "lead")?)
        .await;
    ensure!(matches!(
        rejected,
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidAssignee(_)))
    ));

    let Some(stored) = harness.service.get_task(GetTaskQuery::new(id)?).await? else {
        bail!("task should exist");
    };
    ensure!(stored.assignee().user_id() == Some("u-1"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_rejects_updates_until_reopened(harness: Harness) -> eyre::Result<()> {
    let created = harness.create("Ship release").await?;
    let id = created.id().as_str();
    harness
        .service
        .complete_task(CompleteTaskCommand::new(id, "dev")?)
        .await?;

    let blocked = harness
        .service
        .update_task(UpdateTaskCommand::new(id, "dev")?.with_title("Ship release 2"))
        .await;
    ensure!(matches!(
        blocked,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::AggregateComplete { .. }
        ))
    ));

    harness
        .service
        .reopen_task(TaskActionCommand::new(id, "dev")?)
        .await?;
    let renamed = harness
        .service
        .update_task(UpdateTaskCommand::new(id, "dev")?.with_title("Ship release 2"))
        .await?;
    ensure!(renamed.title().as_str() == "Ship release 2");
    ensure!(renamed.status() == TaskStatus::Todo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reloaded_tasks_carry_no_stale_events(harness: Harness) -> eyre::Result<()> {
    let created = harness
        .create_with(
            CreateTaskCommand::new("Migrate billing", "creator")?.with_project_id("proj-billing"),
        )
        .await?;

    let Some(loaded) = harness
        .service
        .get_task(GetTaskQuery::new(created.id().as_str())?)
        .await?
    else {
        bail!("task should exist");
    };

    ensure!(loaded == created);
    ensure!(loaded.snapshot() == created.snapshot());
    ensure!(loaded.pending_events().is_empty());
    ensure!(harness.repository.all().len() == 1);
    Ok(())
}
