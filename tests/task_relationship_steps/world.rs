//! Shared world state for task relationship BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklink::relationship::{
    adapters::memory::InMemoryRelationshipRepository,
    domain::Relationship,
    services::{RelationshipService, RelationshipServiceError},
};
use tasklink::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryRelationshipRepository, DefaultClock>;

/// Relationship service type used by the BDD world.
pub type TestRelationshipService =
    RelationshipService<InMemoryRelationshipRepository, InMemoryTaskRepository, DefaultClock>;

/// Scenario world for relationship behaviour tests.
pub struct RelationshipWorld {
    pub tasks: TestTaskService,
    pub relationships: TestRelationshipService,
    pub task_ids: HashMap<String, TaskId>,
    pub last_relationship_result: Option<Result<Relationship, RelationshipServiceError>>,
    pub last_status_result: Option<Result<Task, TaskLifecycleError>>,
}

impl RelationshipWorld {
    /// Creates a world over empty in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let relationship_repo = Arc::new(InMemoryRelationshipRepository::new());
        let clock = Arc::new(DefaultClock);

        Self {
            tasks: TaskLifecycleService::new(
                Arc::clone(&task_repo),
                Arc::clone(&relationship_repo),
                Arc::clone(&clock),
            ),
            relationships: RelationshipService::new(relationship_repo, task_repo, clock),
            task_ids: HashMap::new(),
            last_relationship_result: None,
            last_status_result: None,
        }
    }

    /// Resolves a scenario task name to its identifier.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task '{name}' in scenario world"))
    }
}

impl Default for RelationshipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RelationshipWorld {
    RelationshipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
