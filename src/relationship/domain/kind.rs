//! Relationship kinds and their canonical dependency form.

use super::ParseRelationshipKindError;
use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surface kind of a stored relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    /// Source must be finished before target.
    Blocks,
    /// Source waits on target; the reverse of [`Self::Blocks`].
    BlockedBy,
    /// Informational link with no direction semantics.
    RelatesTo,
    /// Source duplicates target.
    Duplicates,
    /// Source is the parent of target.
    ParentOf,
    /// Source is a child of target; the reverse of [`Self::ParentOf`].
    ChildOf,
}

impl RelationshipKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Blocks,
        Self::BlockedBy,
        Self::RelatesTo,
        Self::Duplicates,
        Self::ParentOf,
        Self::ChildOf,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::BlockedBy => "blocked-by",
            Self::RelatesTo => "relates-to",
            Self::Duplicates => "duplicates",
            Self::ParentOf => "parent-of",
            Self::ChildOf => "child-of",
        }
    }

    /// Returns the logical dependency kind, or `None` for kinds that carry no
    /// direction semantics.
    #[must_use]
    pub const fn dependency_kind(self) -> Option<DependencyKind> {
        match self {
            Self::Blocks | Self::BlockedBy => Some(DependencyKind::Blocks),
            Self::ParentOf | Self::ChildOf => Some(DependencyKind::ParentOf),
            Self::RelatesTo | Self::Duplicates => None,
        }
    }

    /// Maps this kind and its endpoints onto the canonical direction.
    ///
    /// `blocked-by(a, b)` becomes `blocks(b, a)` and `child-of(a, b)` becomes
    /// `parent-of(b, a)`. Returns `None` for `relates-to` and `duplicates`.
    #[must_use]
    pub fn canonicalize(self, source: TaskId, target: TaskId) -> Option<CanonicalEdge> {
        let kind = self.dependency_kind()?;
        let (source, target) = match self {
            Self::BlockedBy | Self::ChildOf => (target, source),
            _ => (source, target),
        };
        Some(CanonicalEdge {
            kind,
            source,
            target,
        })
    }
}

impl TryFrom<&str> for RelationshipKind {
    type Error = ParseRelationshipKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
            .ok_or_else(|| ParseRelationshipKindError(value.to_owned()))
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logical dependency family whose induced graph must stay acyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// `blocks` and `blocked-by` edges.
    Blocks,
    /// `parent-of` and `child-of` edges.
    ParentOf,
}

impl DependencyKind {
    /// Returns the name of the canonical surface kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::ParentOf => "parent-of",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dependency edge in canonical direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalEdge {
    /// Logical dependency kind.
    pub kind: DependencyKind,
    /// Task the dependency points from (the blocker or the parent).
    pub source: TaskId,
    /// Task the dependency points to (the blocked task or the child).
    pub target: TaskId,
}

/// Identity used to detect duplicate relationships.
///
/// Directional kinds compare by canonical edge, so `blocks(a, b)` and
/// `blocked-by(b, a)` collide. Symmetric kinds compare by literal triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKey {
    /// Key of a directional relationship.
    Directed(CanonicalEdge),
    /// Key of a `relates-to` or `duplicates` relationship.
    Literal {
        /// Surface kind.
        kind: RelationshipKind,
        /// Source task.
        source: TaskId,
        /// Target task.
        target: TaskId,
    },
}

impl EdgeKey {
    /// Builds the identity of a relationship triple.
    #[must_use]
    pub fn of(kind: RelationshipKind, source: TaskId, target: TaskId) -> Self {
        kind.canonicalize(source, target).map_or(
            Self::Literal {
                kind,
                source,
                target,
            },
            Self::Directed,
        )
    }
}
