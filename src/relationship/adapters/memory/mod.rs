//! In-memory relationship adapters.

mod relationship;

pub use relationship::InMemoryRelationshipRepository;
