//! Listing filter for relationship queries.

use super::{Relationship, RelationshipKind};
use crate::task::domain::TaskId;

/// Optional criteria applied when listing relationships.
///
/// Unset fields are wildcards. Kinds match literally: a `blocks` filter does
/// not return `blocked-by` edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationshipFilter {
    /// Required source task, if any.
    pub source_task_id: Option<TaskId>,
    /// Required target task, if any.
    pub target_task_id: Option<TaskId>,
    /// Required surface kind, if any.
    pub kind: Option<RelationshipKind>,
}

impl RelationshipFilter {
    /// Creates a filter that matches every relationship.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to one source task.
    #[must_use]
    pub const fn with_source(mut self, task_id: TaskId) -> Self {
        self.source_task_id = Some(task_id);
        self
    }

    /// Restricts results to one target task.
    #[must_use]
    pub const fn with_target(mut self, task_id: TaskId) -> Self {
        self.target_task_id = Some(task_id);
        self
    }

    /// Restricts results to one surface kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: RelationshipKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns `true` when the relationship satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, relationship: &Relationship) -> bool {
        self.source_task_id
            .is_none_or(|id| id == relationship.source_task_id())
            && self
                .target_task_id
                .is_none_or(|id| id == relationship.target_task_id())
            && self.kind.is_none_or(|kind| kind == relationship.kind())
    }
}
