//! Task records for Tasklink.
//!
//! Tasks mirror issues received from Jira, Linear, and GitHub. The module
//! stores them, filters them for listing, and applies status changes. A
//! change to the terminal `Done` status is routed through the
//! [`crate::relationship::services::CompletionGate`] so that a task cannot be
//! completed while another unfinished task blocks it. The module follows
//! hexagonal architecture:
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
