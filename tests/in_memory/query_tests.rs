//! In-memory integration tests for task queries.

use super::helpers::{Harness, harness, shifted, titles, today};
use chrono::NaiveDate;
use eyre::ensure;
use rstest::rstest;
use taskwright::task::{
    domain::TaskStatus,
    ports::TaskRepository,
    services::{
        AssignTaskCommand, CompleteTaskCommand, CreateTaskCommand, GetTasksByAssigneeQuery,
        GetTasksByProjectQuery, TagTaskCommand, TaskActionCommand,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_and_assignee_queries_filter_tasks(harness: Harness) -> eyre::Result<()> {
    let first = harness
        .create_with(CreateTaskCommand::new("Design schema", "creator")?.with_project_id("alpha"))
        .await?;
    harness
        .create_with(CreateTaskCommand::new("Write API", "creator")?.with_project_id("alpha"))
        .await?;
    harness
        .create_with(CreateTaskCommand::new("Plan launch", "creator")?.with_project_id("beta"))
        .await?;
    harness
        .service
        .assign_task(AssignTaskCommand::new(
            first.id().as_str(),
            "u-9",
            "Kim",
            "kim@example.com",
            "lead",
        )?)
        .await?;

    let alpha = harness
        .service
        .tasks_in_project(GetTasksByProjectQuery::new("alpha")?)
        .await?;
    let kims = harness
        .service
        .tasks_assigned_to(GetTasksByAssigneeQuery::new("u-9")?)
        .await?;
    let nobody = harness
        .service
        .tasks_assigned_to(GetTasksByAssigneeQuery::new("u-404")?)
        .await?;

    ensure!(titles(&alpha).len() == 2);
    ensure!(titles(&kims) == ["Design schema"]);
    ensure!(nobody.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_query_tracks_transitions(harness: Harness) -> eyre::Result<()> {
    let started = harness.create("Started").await?;
    harness.create("Waiting").await?;
    harness
        .service
        .start_task(TaskActionCommand::new(started.id().as_str(), "dev")?)
        .await?;

    let todo = harness.service.tasks_with_status(TaskStatus::Todo).await?;
    let in_progress = harness
        .service
        .tasks_with_status(TaskStatus::InProgress)
        .await?;

    ensure!(titles(&todo) == ["Waiting"]);
    ensure!(titles(&in_progress) == ["Started"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn date_queries_skip_complete_and_undated_tasks(
    harness: Harness,
    today: NaiveDate,
) -> eyre::Result<()> {
    for (title, offset) in [("Late", -2), ("Late but done", -1), ("Due now", 0), ("Next week", 7)] {
        harness
            .create_with(
                CreateTaskCommand::new(title, "creator")?.with_due_date(shifted(today, offset)),
            )
            .await?;
    }
    harness.create("Undated").await?;
    let finished = harness
        .repository
        .all()
        .into_iter()
        .find(|task| task.title().as_str() == "Late but done")
        .ok_or_else(|| eyre::eyre!("missing seeded task"))?;
    harness
        .service
        .complete_task(CompleteTaskCommand::new(finished.id().as_str(), "dev")?)
        .await?;

    ensure!(titles(&harness.repository.find_overdue(today).await?) == ["Late"]);
    ensure!(titles(&harness.repository.find_due_today(today).await?) == ["Due now"]);
    ensure!(titles(&harness.service.overdue_tasks().await?) == ["Late"]);
    ensure!(titles(&harness.service.tasks_due_today().await?) == ["Due now"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tag_query_normalizes_input(harness: Harness) -> eyre::Result<()> {
    let tagged = harness.create("Tagged").await?;
    harness.create("Untagged").await?;
    harness
        .service
        .tag_task(TagTaskCommand::add(tagged.id().as_str(), "  Infra ")?)
        .await?;

    ensure!(titles(&harness.service.tasks_tagged("INFRA").await?) == ["Tagged"]);
    ensure!(harness.service.tasks_tagged("missing").await?.is_empty());
    Ok(())
}
