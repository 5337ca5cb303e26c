//! Given steps for task audit trail scenarios.

use super::world::{TaskAuditWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a task titled "{title}" with status "{status}""#)]
fn existing_task(
    world: &mut TaskAuditWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = run_async(
        world
            .service
            .create_task(&json!({ "title": title, "status": status })),
    )
    .wrap_err("create task in scenario setup")?;
    world.task = Some(task);
    Ok(())
}

#[given("the audit store rejects writes")]
fn audit_store_rejects_writes(world: &mut TaskAuditWorld) {
    world.logs.fail_writes();
}
