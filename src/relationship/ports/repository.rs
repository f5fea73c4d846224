//! Repository port for relationship edge storage.

use crate::relationship::domain::{Relationship, RelationshipFilter, RelationshipId, RelationshipKind};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for relationship repository operations.
pub type RelationshipRepositoryResult<T> = Result<T, RelationshipRepositoryError>;

/// Relationship edge persistence contract.
///
/// Implementations store edges exactly as given. Duplicate and cycle rules
/// are enforced by [`crate::relationship::services::RelationshipService`];
/// storage only guards the literal `(source, target, kind)` triple.
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Stores a new relationship.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipRepositoryError::Duplicate`] when an edge with
    /// the same literal triple already exists.
    async fn insert(&self, relationship: &Relationship) -> RelationshipRepositoryResult<()>;

    /// Persists a changed kind and update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipRepositoryError::NotFound`] when the edge does not
    /// exist, or [`RelationshipRepositoryError::Duplicate`] when the new kind
    /// collides with another edge's literal triple.
    async fn update(&self, relationship: &Relationship) -> RelationshipRepositoryResult<()>;

    /// Removes a relationship.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipRepositoryError::NotFound`] when the edge does not
    /// exist.
    async fn delete(&self, id: RelationshipId) -> RelationshipRepositoryResult<()>;

    /// Finds a relationship by identifier.
    ///
    /// Returns `None` when the edge does not exist.
    async fn find_by_id(
        &self,
        id: RelationshipId,
    ) -> RelationshipRepositoryResult<Option<Relationship>>;

    /// Returns every relationship matching the filter, oldest first.
    async fn list(
        &self,
        filter: &RelationshipFilter,
    ) -> RelationshipRepositoryResult<Vec<Relationship>>;

    /// Returns every relationship with the task as source or target.
    async fn find_by_task(&self, task_id: TaskId) -> RelationshipRepositoryResult<Vec<Relationship>>;

    /// Removes every relationship with the task as source or target and
    /// returns how many were removed.
    async fn delete_by_task(&self, task_id: TaskId) -> RelationshipRepositoryResult<usize>;
}

/// Errors returned by relationship repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RelationshipRepositoryError {
    /// An edge with the same literal triple already exists.
    #[error("relationship already exists: {source_task_id} {kind} {target_task_id}")]
    Duplicate {
        /// Source task of the colliding edge.
        source_task_id: TaskId,
        /// Target task of the colliding edge.
        target_task_id: TaskId,
        /// Surface kind of the colliding edge.
        kind: RelationshipKind,
    },

    /// The relationship was not found.
    #[error("relationship not found: {0}")]
    NotFound(RelationshipId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RelationshipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a duplicate error describing the given edge.
    #[must_use]
    pub const fn duplicate_of(relationship: &Relationship) -> Self {
        Self::Duplicate {
            source_task_id: relationship.source_task_id(),
            target_task_id: relationship.target_task_id(),
            kind: relationship.kind(),
        }
    }
}
