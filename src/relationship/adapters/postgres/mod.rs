//! `PostgreSQL` adapters for relationship persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresRelationshipRepository;
