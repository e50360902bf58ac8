//! Given steps for task state transition BDD scenarios.

use super::world::{TaskTransitionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskwright::task::services::{CompleteTaskCommand, CreateTaskCommand, TaskActionCommand};

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut TaskTransitionWorld, title: String) -> Result<(), eyre::Report> {
    let command = CreateTaskCommand::new(title, "scenario")?;
    let created = run_async(world.service.create_task(command))
        .wrap_err("create task for transition scenario")?;
    world.task = Some(created);
    Ok(())
}

#[given(r#"the task has been completed by "{actor}""#)]
fn task_has_been_completed(
    world: &mut TaskTransitionWorld,
    actor: String,
) -> Result<(), eyre::Report> {
    let command = CompleteTaskCommand::new(world.task_id()?, actor)?;
    let completed = run_async(world.service.complete_task(command))
        .wrap_err("complete task in scenario setup")?;
    world.task = Some(completed);
    Ok(())
}

#[given("the task has been cancelled")]
fn task_has_been_cancelled(world: &mut TaskTransitionWorld) -> Result<(), eyre::Report> {
    let command = TaskActionCommand::new(world.task_id()?, "scenario")?;
    let cancelled = run_async(world.service.cancel_task(command))
        .wrap_err("cancel task in scenario setup")?;
    world.task = Some(cancelled);
    Ok(())
}
