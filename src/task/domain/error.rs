//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The integration value is unsupported.
    #[error(transparent)]
    InvalidIntegration(#[from] ParseIntegrationError),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task status is empty after trimming.
    #[error("task status must not be empty")]
    EmptyStatus,
}

/// Error returned while parsing integrations from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported integration '{0}', expected one of: jira, linear, github")]
pub struct ParseIntegrationError(pub String);
