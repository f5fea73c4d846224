//! In-memory task repository tests.

use super::helpers::{build_task, clock, task_repo};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::rstest;
use tasklink::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Integration, TaskFilter, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(
    task_repo: InMemoryTaskRepository,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let task = build_task(&clock, "Task", "To-Do", Integration::Jira)?;
    task_repo.store(&task).await.wrap_err("first store")?;

    let result = task_repo.store(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_new_status(
    task_repo: InMemoryTaskRepository,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut task = build_task(&clock, "Task", "To-Do", Integration::Linear)?;
    task_repo.store(&task).await?;

    task.set_status(TaskStatus::done(), &clock);
    task_repo.update(&task).await?;

    let stored = task_repo
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert!(stored.status().is_complete());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_report_missing_task(
    task_repo: InMemoryTaskRepository,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let task = build_task(&clock, "Never stored", "To-Do", Integration::GitHub)?;

    let updated = task_repo.update(&task).await;
    let deleted = task_repo.delete(TaskId::new()).await;

    assert!(matches!(updated, Err(TaskRepositoryError::NotFound(_))));
    assert!(matches!(deleted, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_integration_and_search(
    task_repo: InMemoryTaskRepository,
    clock: DefaultClock,
) -> eyre::Result<()> {
    for (title, integration) in [
        ("Parser crash", Integration::GitHub),
        ("Parser docs", Integration::Jira),
        ("Release notes", Integration::GitHub),
    ] {
        task_repo
            .store(&build_task(&clock, title, "To-Do", integration)?)
            .await?;
    }

    let found = task_repo
        .list(
            &TaskFilter::new()
                .with_integration(Integration::GitHub)
                .with_search("PARSER"),
        )
        .await?;

    let titles: Vec<&str> = found.iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["Parser crash"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task(
    task_repo: InMemoryTaskRepository,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let task = build_task(&clock, "Task", "To-Do", Integration::Jira)?;
    task_repo.store(&task).await?;

    task_repo.delete(task.id()).await?;

    assert!(task_repo.find_by_id(task.id()).await?.is_none());
    assert!(task_repo.list(&TaskFilter::new()).await?.is_empty());
    Ok(())
}
