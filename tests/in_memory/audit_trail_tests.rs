//! Audit trail tests against in-memory stores.

use super::helpers::{Stores, stores};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use task_api::{
    audit::{
        domain::{ENTITY_TYPE_TASK, LogAction},
        ports::LogRepository,
    },
    task::{ports::TaskRepository, services::TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_leaves_one_record_per_mutation(stores: Stores) {
    let created = stores
        .service
        .create_task(&json!({ "title": "Lifecycle", "status": "pending" }))
        .await
        .expect("create succeeds");
    let updated = stores
        .service
        .update_task(created.id(), &json!({ "status": "in_progress" }))
        .await
        .expect("update succeeds")
        .expect("task exists");
    stores
        .service
        .delete_task(created.id())
        .await
        .expect("delete succeeds");

    let logs = stores
        .service
        .audit()
        .list_by_entity(ENTITY_TYPE_TASK, Some(&created.id().to_string()), 10)
        .await
        .expect("listing succeeds");
    let actions: Vec<&str> = logs.iter().map(|log| log.action().as_str()).collect();
    assert_eq!(actions, ["deleted", "updated", "created"]);

    let deleted_log = logs.first().expect("delete record");
    assert_eq!(
        deleted_log.data(),
        &serde_json::to_value(&updated).expect("serializes")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn records_outlive_the_deleted_task(stores: Stores) {
    let created = stores
        .service
        .create_task(&json!({ "title": "Ephemeral", "status": "pending" }))
        .await
        .expect("create succeeds");
    stores
        .service
        .delete_task(created.id())
        .await
        .expect("delete succeeds");

    assert_eq!(stores.logs_for(&created).await, 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reads_write_no_records(stores: Stores) {
    let created = stores.seed(1, "pending").await;
    let task = created.first().expect("seeded task");

    stores.service.get_task(task.id()).await.expect("lookup");
    stores
        .service
        .list_tasks(&Default::default())
        .await;
    stores.service.task_statistics().await.expect("statistics");

    assert_eq!(stores.logs_for(task).await, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_audit_write_surfaces_after_task_commit(stores: Stores) {
    stores.logs.fail_writes();

    let result = stores
        .service
        .create_task(&json!({ "title": "Committed anyway", "status": "pending" }))
        .await;

    assert!(matches!(result, Err(TaskServiceError::Audit(_))));
    assert_eq!(
        stores.tasks.count_by_status(None).await.expect("count"),
        1
    );
    assert_eq!(
        stores
            .logs
            .count_by_entity(ENTITY_TYPE_TASK, None)
            .await
            .expect("count"),
        0
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_each_get_exactly_one_record(stores: Stores) {
    let service = Arc::new(stores.service.clone());
    let handles: Vec<_> = (0..16)
        .map(|index| {
            let worker = Arc::clone(&service);
            tokio::spawn(async move {
                worker
                    .create_task(&json!({ "title": format!("parallel {index}"), "status": "pending" }))
                    .await
            })
        })
        .collect();

    let mut created = Vec::new();
    for handle in handles {
        created.push(
            handle
                .await
                .expect("task joins")
                .expect("create succeeds"),
        );
    }

    for task in &created {
        let logs = stores
            .logs
            .find_by_entity(ENTITY_TYPE_TASK, Some(&task.id().to_string()), 10)
            .await
            .expect("lookup");
        assert_eq!(logs.len(), 1);
        assert_eq!(
            logs.first().map(|log| log.action().clone()),
            Some(LogAction::Created)
        );
    }
}
