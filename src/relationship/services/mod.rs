//! Application services for relationship management.

mod gate;
mod graph;
mod store;

pub use gate::{CompletionCheck, CompletionGate, CompletionGateError};
pub use store::{
    CreateRelationshipRequest, RelationshipService, RelationshipServiceError,
    RelationshipServiceResult,
};
