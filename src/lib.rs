//! Tasklink: issue-tracker task store with a cycle-safe relationship graph.
//!
//! This crate persists tasks synchronised from external issue trackers
//! (Jira, Linear, GitHub), records typed directed relationships between them,
//! and guards task completion against unfinished blockers.
//!
//! # Architecture
//!
//! Tasklink follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: Task records and the status lifecycle
//! - [`relationship`]: Typed task relationships, cycle detection, and the
//!   completion gate
//! - [`http`]: JSON HTTP surface over both services
//! - [`config`]: Server configuration

pub mod config;
pub mod http;
pub mod relationship;
pub mod task;
