//! Relationship aggregate.

use super::{CanonicalEdge, EdgeKey, RelationshipId, RelationshipKind};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Directed, typed edge between two tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    id: RelationshipId,
    source_task_id: TaskId,
    target_task_id: TaskId,
    kind: RelationshipKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRelationshipData {
    /// Persisted relationship identifier.
    pub id: RelationshipId,
    /// Persisted source task.
    pub source_task_id: TaskId,
    /// Persisted target task.
    pub target_task_id: TaskId,
    /// Persisted surface kind.
    pub kind: RelationshipKind,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Creates a relationship with server-assigned identifier and timestamps.
    #[must_use]
    pub fn new(
        source_task_id: TaskId,
        target_task_id: TaskId,
        kind: RelationshipKind,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: RelationshipId::new(),
            source_task_id,
            target_task_id,
            kind,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a relationship from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedRelationshipData) -> Self {
        Self {
            id: data.id,
            source_task_id: data.source_task_id,
            target_task_id: data.target_task_id,
            kind: data.kind,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the relationship identifier.
    #[must_use]
    pub const fn id(&self) -> RelationshipId {
        self.id
    }

    /// Returns the source task.
    #[must_use]
    pub const fn source_task_id(&self) -> TaskId {
        self.source_task_id
    }

    /// Returns the target task.
    #[must_use]
    pub const fn target_task_id(&self) -> TaskId {
        self.target_task_id
    }

    /// Returns the surface kind.
    #[must_use]
    pub const fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the canonical dependency edge, if the kind is directional.
    #[must_use]
    pub fn canonical(&self) -> Option<CanonicalEdge> {
        self.kind
            .canonicalize(self.source_task_id, self.target_task_id)
    }

    /// Returns the duplicate-detection identity of this relationship.
    #[must_use]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::of(self.kind, self.source_task_id, self.target_task_id)
    }

    /// Returns `true` when the relationship touches the task at either end.
    #[must_use]
    pub fn touches(&self, task_id: TaskId) -> bool {
        self.source_task_id == task_id || self.target_task_id == task_id
    }

    /// Redefines the kind, keeping both endpoints, and refreshes
    /// `updated_at`.
    pub fn change_kind(&mut self, kind: RelationshipKind, clock: &impl Clock) {
        self.kind = kind;
        self.updated_at = clock.utc();
    }
}
