//! Domain model for task relationships.

mod error;
mod filter;
mod ids;
mod kind;
mod relationship;

pub use error::{ParseRelationshipKindError, RelationshipDomainError};
pub use filter::RelationshipFilter;
pub use ids::RelationshipId;
pub use kind::{CanonicalEdge, DependencyKind, EdgeKey, RelationshipKind};
pub use relationship::{PersistedRelationshipData, Relationship};
