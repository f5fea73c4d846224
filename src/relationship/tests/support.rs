//! Shared fixtures for relationship service tests.

use std::sync::Arc;

use crate::relationship::{
    adapters::memory::InMemoryRelationshipRepository,
    domain::{Relationship, RelationshipId},
    services::{CompletionGate, CreateRelationshipRequest, RelationshipService},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Integration, NewTask, Task, TaskId, TaskStatus},
    ports::TaskRepository,
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestService =
    RelationshipService<InMemoryRelationshipRepository, InMemoryTaskRepository, DefaultClock>;
pub(super) type TestGate = CompletionGate<InMemoryRelationshipRepository, InMemoryTaskRepository>;

pub(super) struct Harness {
    pub(super) tasks: Arc<InMemoryTaskRepository>,
    pub(super) relationships: Arc<InMemoryRelationshipRepository>,
    pub(super) service: TestService,
    pub(super) gate: TestGate,
}

impl Harness {
    pub(super) async fn task(&self, title: &str, status: &str) -> TaskId {
        let task = Task::new(
            NewTask {
                title: title.to_owned(),
                status: TaskStatus::new(status).expect("valid status"),
                integration: Integration::Linear,
                description: None,
                priority: None,
            },
            &DefaultClock,
        )
        .expect("valid task");
        self.tasks.store(&task).await.expect("task store should succeed");
        task.id()
    }

    pub(super) async fn link(&self, source: TaskId, target: TaskId, kind: &str) -> RelationshipId {
        self.service
            .create(CreateRelationshipRequest::new(source, target, kind))
            .await
            .expect("relationship creation should succeed")
            .id()
    }

    pub(super) async fn stored(&self, id: RelationshipId) -> Option<Relationship> {
        self.service
            .find_by_id(id)
            .await
            .expect("lookup should succeed")
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let relationships = Arc::new(InMemoryRelationshipRepository::new());
    Harness {
        service: RelationshipService::new(
            Arc::clone(&relationships),
            Arc::clone(&tasks),
            Arc::new(DefaultClock),
        ),
        gate: CompletionGate::new(Arc::clone(&relationships), Arc::clone(&tasks)),
        tasks,
        relationships,
    }
}
