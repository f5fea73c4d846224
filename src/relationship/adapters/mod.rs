//! Adapter implementations for the relationship repository port.
//!
//! - [`memory::InMemoryRelationshipRepository`]: Thread-safe in-memory
//!   storage for tests and the `memory` server backend
//! - [`postgres::PostgresRelationshipRepository`]: `PostgreSQL` persistence
//!   using Diesel ORM

pub mod memory;
pub mod postgres;
