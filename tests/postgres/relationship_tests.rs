//! `PostgreSQL` relationship repository tests.

use super::helpers::{BoxError, PreparedRepos, build_task, clock, prepare};
use mockable::DefaultClock;
use rstest::rstest;
use tasklink::relationship::{
    domain::{Relationship, RelationshipFilter, RelationshipKind},
    ports::{RelationshipRepository, RelationshipRepositoryError},
};
use tasklink::task::{domain::TaskId, ports::TaskRepository};

async fn stored_tasks(
    repos: &PreparedRepos,
    clock: &DefaultClock,
    count: usize,
) -> Result<Vec<TaskId>, BoxError> {
    let mut ids = Vec::with_capacity(count);
    for index in 0..count {
        let task = build_task(clock, &format!("Task {index}"), "To-Do")?;
        repos.tasks.store(&task).await?;
        ids.push(task.id());
    }
    Ok(ids)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_and_find_round_trip(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let ids = stored_tasks(&repos, &clock, 2).await?;
    let [a, b] = ids[..] else {
        return Err("expected two tasks".into());
    };
    let edge = Relationship::new(a, b, RelationshipKind::ChildOf, &clock);
    repos.relationships.insert(&edge).await?;

    let fetched = repos
        .relationships
        .find_by_id(edge.id())
        .await?
        .ok_or("relationship should exist")?;

    assert_eq!(fetched.source_task_id(), a);
    assert_eq!(fetched.target_task_id(), b);
    assert_eq!(fetched.kind(), RelationshipKind::ChildOf);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unique_index_rejects_identical_triple(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let ids = stored_tasks(&repos, &clock, 2).await?;
    let [a, b] = ids[..] else {
        return Err("expected two tasks".into());
    };
    repos
        .relationships
        .insert(&Relationship::new(a, b, RelationshipKind::RelatesTo, &clock))
        .await?;

    let result = repos
        .relationships
        .insert(&Relationship::new(a, b, RelationshipKind::RelatesTo, &clock))
        .await;

    assert!(matches!(
        result,
        Err(RelationshipRepositoryError::Duplicate { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_kind(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let ids = stored_tasks(&repos, &clock, 2).await?;
    let [a, b] = ids[..] else {
        return Err("expected two tasks".into());
    };
    let mut edge = Relationship::new(a, b, RelationshipKind::RelatesTo, &clock);
    repos.relationships.insert(&edge).await?;

    edge.change_kind(RelationshipKind::Duplicates, &clock);
    repos.relationships.update(&edge).await?;

    let listed = repos
        .relationships
        .list(&RelationshipFilter::new().with_kind(RelationshipKind::Duplicates))
        .await?;
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_and_delete_by_task_cover_both_directions(
    clock: DefaultClock,
) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let ids = stored_tasks(&repos, &clock, 3).await?;
    let [a, b, c] = ids[..] else {
        return Err("expected three tasks".into());
    };
    for (source, target, kind) in [
        (a, b, RelationshipKind::Blocks),
        (c, a, RelationshipKind::BlockedBy),
        (b, c, RelationshipKind::RelatesTo),
    ] {
        repos
            .relationships
            .insert(&Relationship::new(source, target, kind, &clock))
            .await?;
    }

    assert_eq!(repos.relationships.find_by_task(a).await?.len(), 2);
    assert_eq!(repos.relationships.delete_by_task(a).await?, 2);
    assert_eq!(
        repos
            .relationships
            .list(&RelationshipFilter::new())
            .await?
            .len(),
        1
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_row_cascades_to_edges(clock: DefaultClock) -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let ids = stored_tasks(&repos, &clock, 2).await?;
    let [a, b] = ids[..] else {
        return Err("expected two tasks".into());
    };
    repos
        .relationships
        .insert(&Relationship::new(a, b, RelationshipKind::Blocks, &clock))
        .await?;

    repos.tasks.delete(b).await?;

    assert!(repos.relationships.find_by_task(a).await?.is_empty());
    Ok(())
}
