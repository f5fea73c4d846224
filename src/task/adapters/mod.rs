//! Adapter implementations for the task repository port.
//!
//! - [`memory::InMemoryTaskRepository`]: Thread-safe in-memory storage for
//!   tests and the `memory` server backend
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM

pub mod memory;
pub mod postgres;
