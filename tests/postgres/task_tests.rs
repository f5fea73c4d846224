//! `PostgreSQL` task repository tests.

use super::helpers::{BoxError, build_task, clock, prepare};
use mockable::DefaultClock;
use rstest::rstest;
use tasklink::task::{
    domain::{Integration, TaskFilter, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_and_find_round_trip(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let task = build_task(&clock, "Persist me", "To-Do")?;
    repos.tasks.store(&task).await?;

    let fetched = repos
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or("task should exist")?;

    assert_eq!(fetched.id(), task.id());
    assert_eq!(fetched.title(), "Persist me");
    assert_eq!(fetched.description(), Some("Persist me imported for testing"));
    assert_eq!(fetched.integration(), Integration::GitHub);
    assert_eq!(fetched.priority(), Some("medium"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let task = build_task(&clock, "Once", "To-Do")?;
    repos.tasks.store(&task).await?;

    let result = repos.tasks.store(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_mutable_fields(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let mut task = build_task(&clock, "Finish", "To-Do")?;
    repos.tasks.store(&task).await?;

    task.set_status(TaskStatus::done(), &clock);
    task.retitle("Finished", &clock)?;
    task.set_priority("low", &clock);
    task.set_description("Wrapped up", &clock);
    repos.tasks.update(&task).await?;
    let missing = repos
        .tasks
        .update(&build_task(&clock, "Ghost", "To-Do")?)
        .await;

    let fetched = repos
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or("task should exist")?;
    assert!(fetched.status().is_complete());
    assert_eq!(fetched.title(), "Finished");
    assert_eq!(fetched.priority(), Some("low"));
    assert_eq!(fetched.description(), Some("Wrapped up"));
    assert!(matches!(missing, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_sql_and_text_filters(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    for (title, status) in [
        ("Fix flaky test", "To-Do"),
        ("Team standup", "To-Do"),
        ("Fix docs", "Done"),
    ] {
        repos.tasks.store(&build_task(&clock, title, status)?).await?;
    }

    let open_work = repos
        .tasks
        .list(
            &TaskFilter::new()
                .with_status(TaskStatus::new("To-Do")?)
                .excluding_meetings(),
        )
        .await?;
    let fixes = repos
        .tasks
        .list(&TaskFilter::new().with_search("fix"))
        .await?;

    let open_titles: Vec<&str> = open_work.iter().map(|task| task.title()).collect();
    assert_eq!(open_titles, vec!["Fix flaky test"]);
    assert_eq!(fixes.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_row(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let task = build_task(&clock, "Temporary", "To-Do")?;
    repos.tasks.store(&task).await?;

    repos.tasks.delete(task.id()).await?;
    let missing = repos.tasks.delete(TaskId::new()).await;

    assert!(repos.tasks.find_by_id(task.id()).await?.is_none());
    assert!(matches!(missing, Err(TaskRepositoryError::NotFound(_))));
    Ok(())
}
