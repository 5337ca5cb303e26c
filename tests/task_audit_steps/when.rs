//! When steps for task audit trail scenarios.

use super::world::{TaskAuditWorld, run_async};
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"a task titled "{title}" is created with status "{status}""#)]
fn create_task(world: &mut TaskAuditWorld, title: String, status: String) {
    match run_async(
        world
            .service
            .create_task(&json!({ "title": title, "status": status })),
    ) {
        Ok(task) => world.task = Some(task),
        Err(err) => world.last_error = Some(err),
    }
}

#[when("a task with a blank title is submitted")]
fn submit_blank_title(world: &mut TaskAuditWorld) {
    let result = run_async(
        world
            .service
            .create_task(&json!({ "title": "   ", "status": "pending" })),
    );
    world.last_error = result.err();
}

#[when(r#"the task status is changed to "{status}""#)]
fn change_status(world: &mut TaskAuditWorld, status: String) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    match run_async(world.service.update_task(id, &json!({ "status": status }))) {
        Ok(Some(updated)) => world.task = Some(updated),
        Ok(None) => return Err(eyre::eyre!("task {id} vanished before update")),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskAuditWorld) -> Result<(), eyre::Report> {
    let id = world.task()?.id();
    match run_async(world.service.delete_task(id)) {
        Ok(true) => {}
        Ok(false) => return Err(eyre::eyre!("task {id} was already gone")),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}
