//! Shared test helpers for in-memory repository integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use tasklink::relationship::adapters::memory::InMemoryRelationshipRepository;
use tasklink::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Integration, NewTask, Task, TaskDomainError, TaskStatus},
};

/// Provides a fresh in-memory task repository for each test.
#[fixture]
pub fn task_repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

/// Provides a fresh in-memory relationship repository for each test.
#[fixture]
pub fn relationship_repo() -> InMemoryRelationshipRepository {
    InMemoryRelationshipRepository::new()
}

/// Provides a clock for aggregate creation.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Builds a task with the given title, status, and integration.
///
/// # Errors
///
/// Returns an error if the title or status is blank.
pub fn build_task(
    clock: &DefaultClock,
    title: &str,
    status: &str,
    integration: Integration,
) -> Result<Task, TaskDomainError> {
    Task::new(
        NewTask {
            title: title.to_owned(),
            status: TaskStatus::new(status)?,
            integration,
            description: None,
            priority: None,
        },
        clock,
    )
}
