//! When steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use rstest_bdd_macros::when;
use taskwright::task::services::{CompleteTaskCommand, TaskActionCommand, UpdateTaskCommand};

#[when("the task is started")]
fn start_task(world: &mut TaskTransitionWorld) -> Result<(), eyre::Report> {
    let command = TaskActionCommand::new(world.task_id()?, "scenario")?;
    let result = run_async(world.service.start_task(command));
    world.record(result);
    Ok(())
}

#[when("the task is submitted for review")]
fn submit_task(world: &mut TaskTransitionWorld) -> Result<(), eyre::Report> {
    let command = TaskActionCommand::new(world.task_id()?, "scenario")?;
    let result = run_async(world.service.submit_task_for_review(command));
    world.record(result);
    Ok(())
}

#[when(r#"the task is completed by "{actor}""#)]
fn complete_task(world: &mut TaskTransitionWorld, actor: String) -> Result<(), eyre::Report> {
    let command = CompleteTaskCommand::new(world.task_id()?, actor)?;
    let result = run_async(world.service.complete_task(command));
    world.record(result);
    Ok(())
}

#[when(r#"the task is renamed to "{title}""#)]
fn rename_task(world: &mut TaskTransitionWorld, title: String) -> Result<(), eyre::Report> {
    let command = UpdateTaskCommand::new(world.task_id()?, "scenario")?.with_title(title);
    let result = run_async(world.service.update_task(command));
    world.record(result);
    Ok(())
}

#[when("the task is reopened")]
fn reopen_task(world: &mut TaskTransitionWorld) -> Result<(), eyre::Report> {
    let command = TaskActionCommand::new(world.task_id()?, "scenario")?;
    let result = run_async(world.service.reopen_task(command));
    world.record(result);
    Ok(())
}
