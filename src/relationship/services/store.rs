//! Relationship store: validated, cycle-safe edge mutation.

use super::graph::dependency_path_exists;
use crate::relationship::{
    domain::{
        DependencyKind, EdgeKey, Relationship, RelationshipDomainError, RelationshipFilter,
        RelationshipId, RelationshipKind,
    },
    ports::{RelationshipRepository, RelationshipRepositoryError},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRelationshipRequest {
    source_task_id: TaskId,
    target_task_id: TaskId,
    kind: String,
}

impl CreateRelationshipRequest {
    /// Creates a request from endpoints and a raw kind name.
    #[must_use]
    pub fn new(source_task_id: TaskId, target_task_id: TaskId, kind: impl Into<String>) -> Self {
        Self {
            source_task_id,
            target_task_id,
            kind: kind.into(),
        }
    }
}

/// Service-level errors for relationship operations.
#[derive(Debug, Error)]
pub enum RelationshipServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RelationshipDomainError),

    /// The source task does not exist.
    #[error("source task {0} not found")]
    SourceTaskNotFound(TaskId),

    /// The target task does not exist.
    #[error("target task {0} not found")]
    TargetTaskNotFound(TaskId),

    /// The relationship does not exist.
    #[error("relationship {0} not found")]
    NotFound(RelationshipId),

    /// An equivalent relationship already exists.
    #[error("relationship already exists")]
    Duplicate {
        /// Identifier of the existing equivalent edge, when known.
        existing: Option<RelationshipId>,
    },

    /// The mutation would close a cycle in a dependency graph.
    #[error("this relationship would create a circular {0} dependency")]
    CycleDetected(DependencyKind),

    /// Relationship repository operation failed.
    #[error(transparent)]
    Repository(RelationshipRepositoryError),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl From<RelationshipRepositoryError> for RelationshipServiceError {
    fn from(err: RelationshipRepositoryError) -> Self {
        match err {
            RelationshipRepositoryError::Duplicate { .. } => Self::Duplicate { existing: None },
            RelationshipRepositoryError::NotFound(id) => Self::NotFound(id),
            RelationshipRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for relationship service operations.
pub type RelationshipServiceResult<T> = Result<T, RelationshipServiceError>;

/// Relationship store orchestration service.
///
/// Checks run in a fixed order: kind, endpoints, duplicates, cycles. Checks
/// and the following write are not atomic; concurrent writers can race past
/// each other, so callers that need strict guarantees must serialise
/// mutations.
pub struct RelationshipService<R, T, C>
where
    R: RelationshipRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    relationships: Arc<R>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<R, T, C> Clone for RelationshipService<R, T, C>
where
    R: RelationshipRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            relationships: Arc::clone(&self.relationships),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T, C> RelationshipService<R, T, C>
where
    R: RelationshipRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new relationship service.
    #[must_use]
    pub const fn new(relationships: Arc<R>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            relationships,
            tasks,
            clock,
        }
    }

    /// Creates a relationship between two existing tasks.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipServiceError::Domain`] for an unknown kind,
    /// [`RelationshipServiceError::SourceTaskNotFound`] or
    /// [`RelationshipServiceError::TargetTaskNotFound`] for missing tasks,
    /// [`RelationshipServiceError::Duplicate`] when an equivalent edge exists,
    /// and [`RelationshipServiceError::CycleDetected`] when the edge would
    /// close a dependency cycle.
    pub async fn create(
        &self,
        request: CreateRelationshipRequest,
    ) -> RelationshipServiceResult<Relationship> {
        let kind = parse_kind(&request.kind)?;
        let source = request.source_task_id;
        let target = request.target_task_id;

        if self.tasks.find_by_id(source).await?.is_none() {
            return Err(RelationshipServiceError::SourceTaskNotFound(source));
        }
        if self.tasks.find_by_id(target).await?.is_none() {
            return Err(RelationshipServiceError::TargetTaskNotFound(target));
        }

        self.ensure_unique(EdgeKey::of(kind, source, target), source, None)
            .await?;
        self.ensure_acyclic(kind, source, target, None).await?;

        let relationship = Relationship::new(source, target, kind, &*self.clock);
        self.relationships.insert(&relationship).await?;
        info!(
            relationship_id = %relationship.id(),
            source_task_id = %source,
            target_task_id = %target,
            kind = %kind,
            "relationship created"
        );
        Ok(relationship)
    }

    /// Changes the kind of an existing relationship, keeping its endpoints.
    ///
    /// The new kind is validated as if the edge were being created, with the
    /// edge itself excluded from duplicate and cycle checks.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipServiceError::Domain`] for an unknown kind,
    /// [`RelationshipServiceError::NotFound`] for a missing edge,
    /// [`RelationshipServiceError::Duplicate`] when the redefined edge would
    /// equal another edge, and [`RelationshipServiceError::CycleDetected`]
    /// when it would close a dependency cycle.
    pub async fn update(
        &self,
        id: RelationshipId,
        kind: &str,
    ) -> RelationshipServiceResult<Relationship> {
        let kind = parse_kind(kind)?;
        let mut relationship = self
            .relationships
            .find_by_id(id)
            .await?
            .ok_or(RelationshipServiceError::NotFound(id))?;
        let source = relationship.source_task_id();
        let target = relationship.target_task_id();

        self.ensure_unique(EdgeKey::of(kind, source, target), source, Some(id))
            .await?;
        self.ensure_acyclic(kind, source, target, Some(id)).await?;

        relationship.change_kind(kind, &*self.clock);
        self.relationships.update(&relationship).await?;
        info!(relationship_id = %id, kind = %kind, "relationship updated");
        Ok(relationship)
    }

    /// Deletes a relationship.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipServiceError::NotFound`] when the edge does not
    /// exist.
    pub async fn delete(&self, id: RelationshipId) -> RelationshipServiceResult<()> {
        self.relationships.delete(id).await?;
        info!(relationship_id = %id, "relationship deleted");
        Ok(())
    }

    /// Retrieves a relationship by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(
        &self,
        id: RelationshipId,
    ) -> RelationshipServiceResult<Option<Relationship>> {
        Ok(self.relationships.find_by_id(id).await?)
    }

    /// Lists relationships matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`RelationshipServiceError::Repository`] when lookup fails.
    pub async fn list(
        &self,
        filter: &RelationshipFilter,
    ) -> RelationshipServiceResult<Vec<Relationship>> {
        Ok(self.relationships.list(filter).await?)
    }

    async fn ensure_unique(
        &self,
        key: EdgeKey,
        source: TaskId,
        excluded: Option<RelationshipId>,
    ) -> RelationshipServiceResult<()> {
        // Every equivalent edge touches the source task, whichever surface
        // direction it was stored in.
        let existing = self
            .relationships
            .find_by_task(source)
            .await?
            .into_iter()
            .find(|relationship| Some(relationship.id()) != excluded && relationship.key() == key);
        if let Some(relationship) = existing {
            warn!(
                existing_relationship_id = %relationship.id(),
                "rejected duplicate relationship"
            );
            return Err(RelationshipServiceError::Duplicate {
                existing: Some(relationship.id()),
            });
        }
        Ok(())
    }

    async fn ensure_acyclic(
        &self,
        kind: RelationshipKind,
        source: TaskId,
        target: TaskId,
        excluded: Option<RelationshipId>,
    ) -> RelationshipServiceResult<()> {
        let Some(edge) = kind.canonicalize(source, target) else {
            return Ok(());
        };
        // Adding source -> target closes a cycle exactly when target already
        // reaches source.
        let closes_cycle = dependency_path_exists(
            &*self.relationships,
            edge.kind,
            edge.target,
            edge.source,
            excluded,
        )
        .await?;
        if closes_cycle {
            warn!(
                source_task_id = %edge.source,
                target_task_id = %edge.target,
                kind = %edge.kind,
                "rejected relationship that would create a cycle"
            );
            return Err(RelationshipServiceError::CycleDetected(edge.kind));
        }
        Ok(())
    }
}

fn parse_kind(raw: &str) -> Result<RelationshipKind, RelationshipDomainError> {
    Ok(RelationshipKind::try_from(raw)?)
}
