//! Task workflow tests against in-memory stores.

use super::helpers::{Stores, stores};
use rstest::rstest;
use serde_json::json;
use task_api::task::{
    domain::{PageRequest, TaskFilter, TaskId, TaskStatistics, TaskStatus},
    services::TaskServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips_through_get(stores: Stores) {
    let created = stores
        .service
        .create_task(&json!({
            "title": "Plan sprint",
            "description": "Pick stories",
            "status": "pending",
        }))
        .await
        .expect("create succeeds");

    let fetched = stores
        .service
        .get_task(created.id())
        .await
        .expect("lookup succeeds");

    assert_eq!(fetched.as_ref(), Some(&created));
    assert_eq!(created.title(), "Plan sprint");
    assert_eq!(created.description(), Some("Pick stories"));
    assert_eq!(created.status(), TaskStatus::Pending);
    assert_eq!(created.created_at(), created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_of_unknown_task_is_none(stores: Stores) {
    let fetched = stores
        .service
        .get_task(TaskId::new(12_345))
        .await
        .expect("lookup succeeds");

    assert_eq!(fetched, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_and_filtered_listing_agree_with_seed(stores: Stores) {
    stores.seed(5, "pending").await;
    stores.seed(3, "in_progress").await;
    stores.seed(2, "completed").await;

    let statistics = stores
        .service
        .task_statistics()
        .await
        .expect("statistics succeed");
    let pending = stores
        .service
        .list_tasks(&TaskFilter::with_status(TaskStatus::Pending))
        .await;
    let all = stores.service.list_tasks(&TaskFilter::all()).await;

    assert_eq!(
        statistics,
        TaskStatistics {
            total: 10,
            pending: 5,
            in_progress: 3,
            completed: 2,
        }
    );
    assert_eq!(pending.len(), 5);
    assert_eq!(all.len(), 10);
    let newest = all.first().expect("tasks exist");
    assert_eq!(newest.title(), "completed #1");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_supplied_fields(stores: Stores) {
    let created = stores
        .service
        .create_task(&json!({ "title": "Old", "description": "keep", "status": "pending" }))
        .await
        .expect("create succeeds");

    let updated = stores
        .service
        .update_task(created.id(), &json!({ "title": "New" }))
        .await
        .expect("update succeeds")
        .expect("task exists");

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.title(), "New");
    assert_eq!(updated.description(), Some("keep"));
    assert_eq!(updated.status(), TaskStatus::Pending);
    assert_eq!(updated.created_at(), created.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn any_status_may_replace_any_other(stores: Stores) {
    let created = stores
        .service
        .create_task(&json!({ "title": "Loop", "status": "completed" }))
        .await
        .expect("create succeeds");

    for status in ["pending", "completed", "in_progress", "pending"] {
        let updated = stores
            .service
            .update_task(created.id(), &json!({ "status": status }))
            .await
            .expect("update succeeds")
            .expect("task exists");
        assert_eq!(updated.status().as_str(), status);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_gone_and_second_delete_reports_false(stores: Stores) {
    let created = stores
        .service
        .create_task(&json!({ "title": "Short lived", "status": "pending" }))
        .await
        .expect("create succeeds");

    assert!(
        stores
            .service
            .delete_task(created.id())
            .await
            .expect("delete succeeds")
    );
    assert!(
        !stores
            .service
            .delete_task(created.id())
            .await
            .expect("delete succeeds")
    );
    assert_eq!(
        stores
            .service
            .get_task(created.id())
            .await
            .expect("lookup succeeds"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_errors_report_every_bad_field(stores: Stores) {
    let result = stores
        .service
        .create_task(&json!({ "description": 5, "status": "later" }))
        .await;

    let Err(TaskServiceError::Validation(err)) = result else {
        panic!("expected a validation error, got {result:?}");
    };
    let fields: Vec<&str> = err.fields().keys().map(String::as_str).collect();
    assert_eq!(fields, ["description", "status", "title"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn paginated_listing_walks_filtered_pages(stores: Stores) {
    stores.seed(4, "pending").await;
    stores.seed(3, "completed").await;
    let completed = TaskFilter::with_status(TaskStatus::Completed);

    let first = stores
        .service
        .list_paginated_tasks(&completed, PageRequest::first(2))
        .await;
    let second = stores
        .service
        .list_paginated_tasks(&completed, PageRequest::new(2, 2))
        .await;

    let titles: Vec<&str> = first
        .items
        .iter()
        .chain(&second.items)
        .map(|task| task.title())
        .collect();
    assert_eq!(titles, ["completed #2", "completed #1", "completed #0"]);
    assert_eq!((first.total, second.total), (3, 3));
    assert_eq!(second.last_page(), 2);
}
