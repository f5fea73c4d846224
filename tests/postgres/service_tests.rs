//! Relationship and task services running over `PostgreSQL` repositories.

use std::sync::Arc;

use super::helpers::{BoxError, prepare};
use mockable::DefaultClock;
use rstest::rstest;
use tasklink::relationship::services::{
    CreateRelationshipRequest, RelationshipService, RelationshipServiceError,
};
use tasklink::task::services::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskStatusRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cycle_and_gate_rules_hold_over_postgres() -> Result<(), BoxError> {
    let Some(repos) = prepare().await? else {
        return Ok(());
    };
    let tasks = Arc::new(repos.tasks.clone());
    let relationships = Arc::new(repos.relationships.clone());
    let clock = Arc::new(DefaultClock);
    let task_service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::clone(&relationships),
        Arc::clone(&clock),
    );
    let relationship_service = RelationshipService::new(relationships, tasks, clock);

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let task = task_service
            .create(CreateTaskRequest::new(title, "To-Do", "linear"))
            .await?;
        ids.push(task.id());
    }
    let [a, b, c] = ids[..] else {
        return Err("expected three tasks".into());
    };
    relationship_service
        .create(CreateRelationshipRequest::new(a, b, "blocks"))
        .await?;
    relationship_service
        .create(CreateRelationshipRequest::new(c, b, "blocked-by"))
        .await?;

    let cycle = relationship_service
        .create(CreateRelationshipRequest::new(c, a, "blocks"))
        .await;
    let blocked = task_service
        .update_status(UpdateTaskStatusRequest::new(c, "Done"))
        .await;

    assert!(matches!(cycle, Err(RelationshipServiceError::CycleDetected(_))));
    assert!(matches!(
        blocked,
        Err(TaskLifecycleError::Blocked { blocking_task_id, .. }) if blocking_task_id == b
    ));
    Ok(())
}
