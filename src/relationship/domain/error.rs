//! Error types for relationship domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing relationship values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelationshipDomainError {
    /// The relationship kind is not one of the six supported kinds.
    #[error(transparent)]
    InvalidKind(#[from] ParseRelationshipKindError),
}

/// Error returned while parsing relationship kinds from requests or
/// persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "invalid relationship type '{0}'. Must be one of: blocks, blocked-by, relates-to, duplicates, parent-of, child-of"
)]
pub struct ParseRelationshipKindError(pub String);
