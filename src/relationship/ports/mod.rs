//! Port contracts for relationship storage.
//!
//! Ports define infrastructure-agnostic interfaces used by relationship
//! services. Task existence is looked up through
//! [`crate::task::ports::TaskRepository`].

pub mod repository;

pub use repository::{
    RelationshipRepository, RelationshipRepositoryError, RelationshipRepositoryResult,
};
