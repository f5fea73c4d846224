//! Typed relationships between tasks.
//!
//! Relationships are directed edges of six kinds. Four of them express
//! dependency direction and come in pairs (`blocks`/`blocked-by`,
//! `parent-of`/`child-of`); every edge of a pair is canonicalized into one
//! logical [`domain::DependencyKind`] before it is compared or walked. The
//! graph induced by each logical kind is kept acyclic on every insert and
//! update. The same canonical view backs the completion gate, which refuses
//! to let a task reach `Done` while an unfinished task blocks it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
