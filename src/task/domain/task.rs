//! Task aggregate root and related value types.

use super::{ParseIntegrationError, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External issue tracker a task was synchronised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Integration {
    /// Atlassian Jira issues.
    #[serde(rename = "jira")]
    Jira,
    /// Linear issues.
    #[serde(rename = "linear")]
    Linear,
    /// GitHub issues.
    #[serde(rename = "github")]
    GitHub,
}

impl Integration {
    /// Returns the integration name in canonical storage format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jira => "jira",
            Self::Linear => "linear",
            Self::GitHub => "github",
        }
    }
}

impl TryFrom<&str> for Integration {
    type Error = ParseIntegrationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "jira" => Ok(Self::Jira),
            "linear" => Ok(Self::Linear),
            "github" => Ok(Self::GitHub),
            _ => Err(ParseIntegrationError(value.to_owned())),
        }
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task workflow status.
///
/// Statuses form an open set ("To-Do", "In Progress", ...) because they are
/// copied from external trackers. Only [`TaskStatus::DONE`] carries meaning
/// inside Tasklink: it is the terminal complete state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    /// Terminal complete status value.
    pub const DONE: &'static str = "Done";

    /// Creates a validated status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyStatus`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyStatus);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the terminal complete status.
    #[must_use]
    pub fn done() -> Self {
        Self(Self::DONE.to_owned())
    }

    /// Returns `true` when this is the terminal complete status.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0 == Self::DONE
    }

    /// Returns the status as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Initial workflow status.
    pub status: TaskStatus,
    /// Source integration.
    pub integration: Integration,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Optional priority label.
    pub priority: Option<String>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    integration: Integration,
    priority: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted source integration.
    pub integration: Integration,
    /// Persisted priority label, if any.
    pub priority: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with server-assigned identifier and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(new_task: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = new_task.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title: title.to_owned(),
            description: new_task.description,
            status: new_task.status,
            integration: new_task.integration,
            priority: new_task.priority,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            integration: data.integration,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the source integration.
    #[must_use]
    pub const fn integration(&self) -> Integration {
        self.integration
    }

    /// Returns the priority label, if any.
    #[must_use]
    pub fn priority(&self) -> Option<&str> {
        self.priority.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the workflow status and refreshes `updated_at`.
    ///
    /// Blocker checks are not performed here; they belong to the completion
    /// gate, which needs access to the relationship graph.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Replaces the title, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn retitle(&mut self, title: &str, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        title.clone_into(&mut self.title);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description and refreshes `updated_at`.
    pub fn set_description(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = Some(description.into());
        self.touch(clock);
    }

    /// Replaces the priority label and refreshes `updated_at`.
    pub fn set_priority(&mut self, priority: impl Into<String>, clock: &impl Clock) {
        self.priority = Some(priority.into());
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
