//! Then steps for task audit trail scenarios.

use super::world::{TaskAuditWorld, run_async};
use rstest_bdd_macros::then;
use serde_json::Value;
use task_api::{
    audit::{
        domain::{ENTITY_TYPE_TASK, Log},
        ports::LogRepository,
    },
    task::{domain::TaskFilter, services::TaskServiceError},
};

fn latest_log(world: &TaskAuditWorld) -> Result<Log, eyre::Report> {
    let entity_id = world.task()?.id().to_string();
    let logs = run_async(
        world
            .logs
            .find_by_entity(ENTITY_TYPE_TASK, Some(&entity_id), 1),
    )?;
    logs.into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("no audit record for task {entity_id}"))
}

fn expect_eq<T>(label: &str, actual: T, expected: T) -> Result<(), eyre::Report>
where
    T: PartialEq + std::fmt::Debug,
{
    if actual != expected {
        return Err(eyre::eyre!("expected {label} {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the task store holds {count:usize} task")]
fn store_holds_single(world: &TaskAuditWorld, count: usize) -> Result<(), eyre::Report> {
    store_holds(world, count)
}

#[then("the task store holds {count:usize} tasks")]
fn store_holds(world: &TaskAuditWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list_tasks(&TaskFilter::all()));
    expect_eq("task count", tasks.len(), count)
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskAuditWorld, status: String) -> Result<(), eyre::Report> {
    expect_eq("status", world.task()?.status().as_str(), status.as_str())
}

#[then(r#"the latest audit action for the task is "{action}""#)]
fn latest_action_is(world: &TaskAuditWorld, action: String) -> Result<(), eyre::Report> {
    let log = latest_log(world)?;
    expect_eq("action", log.action().as_str(), action.as_str())
}

#[then(r#"the latest audit record stores the title "{title}""#)]
fn latest_record_title(world: &TaskAuditWorld, title: String) -> Result<(), eyre::Report> {
    let log = latest_log(world)?;
    expect_eq("title", log.data().get("title").and_then(Value::as_str), Some(title.as_str()))
}

#[then(r#"the audit record's old status is "{status}""#)]
fn old_status_is(world: &TaskAuditWorld, status: String) -> Result<(), eyre::Report> {
    let log = latest_log(world)?;
    expect_eq(
        "old status",
        log.data().pointer("/old/status").and_then(Value::as_str),
        Some(status.as_str()),
    )
}

#[then(r#"the audit record's new data only contains the status "{status}""#)]
fn new_data_is_patch(world: &TaskAuditWorld, status: String) -> Result<(), eyre::Report> {
    let log = latest_log(world)?;
    expect_eq(
        "new data",
        log.data().get("new").cloned(),
        Some(serde_json::json!({ "status": status })),
    )
}

#[then(r#"the request is rejected for the "{field}" field"#)]
fn rejected_for_field(world: &TaskAuditWorld, field: String) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(TaskServiceError::Validation(err)) if err.message_for(&field).is_some() => Ok(()),
        other => Err(eyre::eyre!(
            "expected validation error on {field}, got {other:?}"
        )),
    }
}

#[then("no audit records exist")]
fn no_audit_records(world: &TaskAuditWorld) -> Result<(), eyre::Report> {
    let total = run_async(world.logs.count_by_entity(ENTITY_TYPE_TASK, None))?;
    expect_eq("audit record count", total, 0)
}

#[then("the operation fails with an audit error")]
fn fails_with_audit_error(world: &TaskAuditWorld) -> Result<(), eyre::Report> {
    match world.last_error.as_ref() {
        Some(TaskServiceError::Audit(_)) => Ok(()),
        other => Err(eyre::eyre!("expected audit error, got {other:?}")),
    }
}
