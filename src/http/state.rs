//! Shared handler state.

use crate::relationship::{ports::RelationshipRepository, services::RelationshipService};
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use mockable::DefaultClock;
use std::sync::Arc;

/// Task service over type-erased repositories.
pub type AppTaskService =
    TaskLifecycleService<dyn TaskRepository, dyn RelationshipRepository, DefaultClock>;

/// Relationship service over type-erased repositories.
pub type AppRelationshipService =
    RelationshipService<dyn RelationshipRepository, dyn TaskRepository, DefaultClock>;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub(super) tasks: AppTaskService,
    pub(super) relationships: AppRelationshipService,
}

impl AppState {
    /// Wires both services over the same pair of repositories.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        relationships: Arc<dyn RelationshipRepository>,
        clock: Arc<DefaultClock>,
    ) -> Self {
        Self {
            tasks: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&relationships),
                Arc::clone(&clock),
            ),
            relationships: RelationshipService::new(relationships, tasks, clock),
        }
    }
}
