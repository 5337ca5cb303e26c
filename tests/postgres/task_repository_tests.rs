//! Task store behaviour against `PostgreSQL`.

use super::helpers::{BoxError, test_database};
use task_api::task::{
    domain::{NewTask, PageRequest, TaskFilter, TaskId, TaskPatch, TaskStatus},
    ports::TaskRepository,
};

#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_identity_and_timestamps() -> Result<(), BoxError> {
    let Some(db) = test_database().await? else {
        return Ok(());
    };
    let repository = db.tasks();

    let first = repository
        .create(&NewTask::new("First", TaskStatus::Pending).with_description("notes"))
        .await?;
    let second = repository
        .create(&NewTask::new("Second", TaskStatus::Completed))
        .await?;

    assert!(second.id().value() > first.id().value());
    assert_eq!(first.description(), Some("notes"));
    assert_eq!(first.created_at(), first.updated_at());
    let reloaded = repository.find_by_id(first.id()).await?;
    assert_eq!(reloaded.as_ref(), Some(&first));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn find_all_filters_and_orders_newest_first() -> Result<(), BoxError> {
    let Some(db) = test_database().await? else {
        return Ok(());
    };
    let repository = db.tasks();
    for (title, status) in [
        ("a", TaskStatus::Pending),
        ("b", TaskStatus::InProgress),
        ("c", TaskStatus::Pending),
    ] {
        repository.create(&NewTask::new(title, status)).await?;
    }

    let pending = repository
        .find_all(&TaskFilter::with_status(TaskStatus::Pending))
        .await?;
    let all = repository.find_all(&TaskFilter::all()).await?;

    let titles: Vec<&str> = pending.iter().map(|task| task.title()).collect();
    assert_eq!(titles, ["c", "a"]);
    assert_eq!(all.len(), 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_applies_only_supplied_fields() -> Result<(), BoxError> {
    let Some(db) = test_database().await? else {
        return Ok(());
    };
    let repository = db.tasks();
    let task = repository
        .create(&NewTask::new("Draft", TaskStatus::Pending).with_description("old"))
        .await?;

    let updated = repository
        .update(
            task.id(),
            &TaskPatch::default()
                .with_status(TaskStatus::Completed)
                .with_description(None),
        )
        .await?
        .ok_or("updated task missing")?;
    let untouched = repository
        .update(task.id(), &TaskPatch::default())
        .await?
        .ok_or("task missing after empty patch")?;
    let missing = repository
        .update(TaskId::new(i64::MAX), &TaskPatch::default().with_title("x"))
        .await?;

    assert_eq!(updated.title(), "Draft");
    assert_eq!(updated.description(), None);
    assert_eq!(updated.status(), TaskStatus::Completed);
    assert!(updated.updated_at() >= task.updated_at());
    assert_eq!(untouched, updated);
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_exists_and_counts() -> Result<(), BoxError> {
    let Some(db) = test_database().await? else {
        return Ok(());
    };
    let repository = db.tasks();
    let kept = repository
        .create(&NewTask::new("keep", TaskStatus::InProgress))
        .await?;
    let dropped = repository
        .create(&NewTask::new("drop", TaskStatus::Pending))
        .await?;

    assert!(repository.delete(dropped.id()).await?);
    assert!(!repository.delete(dropped.id()).await?);
    assert!(repository.exists(kept.id()).await?);
    assert!(!repository.exists(dropped.id()).await?);
    assert_eq!(repository.count_by_status(None).await?, 1);
    assert_eq!(
        repository
            .count_by_status(Some(TaskStatus::InProgress))
            .await?,
        1
    );
    assert_eq!(
        repository.count_by_status(Some(TaskStatus::Pending)).await?,
        0
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn find_paginated_counts_and_slices() -> Result<(), BoxError> {
    let Some(db) = test_database().await? else {
        return Ok(());
    };
    let repository = db.tasks();
    for index in 0..5 {
        repository
            .create(&NewTask::new(format!("t{index}"), TaskStatus::Pending))
            .await?;
    }
    repository
        .create(&NewTask::new("other", TaskStatus::Completed))
        .await?;
    let pending = TaskFilter::with_status(TaskStatus::Pending);

    let last = repository
        .find_paginated(&pending, PageRequest::new(3, 2))
        .await?;
    let beyond = repository
        .find_paginated(&pending, PageRequest::new(4, 2))
        .await?;

    let titles: Vec<&str> = last.items.iter().map(|task| task.title()).collect();
    assert_eq!(titles, ["t0"]);
    assert_eq!(last.total, 5);
    assert_eq!(last.last_page(), 3);
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 5);
    Ok(())
}
