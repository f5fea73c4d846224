//! Completion gate: blocks `Done` while unfinished blockers remain.

use super::graph::blockers_of;
use crate::relationship::ports::{RelationshipRepository, RelationshipRepositoryError};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Outcome of a completion check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionCheck {
    /// Every blocker is complete, or there are none.
    Allowed,
    /// A blocker is not complete yet.
    Blocked {
        /// The unfinished blocking task.
        task_id: TaskId,
        /// Title of the blocking task, for error messages.
        title: String,
    },
}

impl CompletionCheck {
    /// Returns `true` when completion may proceed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Errors raised while evaluating the completion gate.
#[derive(Debug, Error)]
pub enum CompletionGateError {
    /// Relationship lookup failed.
    #[error(transparent)]
    Relationships(#[from] RelationshipRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Guard consulted before a task moves to the terminal complete status.
///
/// Results are never cached: blocker statuses change independently, so
/// every call reads the current graph and task records.
pub struct CompletionGate<R, T>
where
    R: RelationshipRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    relationships: Arc<R>,
    tasks: Arc<T>,
}

impl<R, T> Clone for CompletionGate<R, T>
where
    R: RelationshipRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            relationships: Arc::clone(&self.relationships),
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<R, T> CompletionGate<R, T>
where
    R: RelationshipRepository + ?Sized,
    T: TaskRepository + ?Sized,
{
    /// Creates a completion gate over the given repositories.
    #[must_use]
    pub const fn new(relationships: Arc<R>, tasks: Arc<T>) -> Self {
        Self {
            relationships,
            tasks,
        }
    }

    /// Returns the tasks that logically block `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionGateError::Relationships`] when lookup fails.
    pub async fn blockers(&self, task_id: TaskId) -> Result<Vec<TaskId>, CompletionGateError> {
        Ok(blockers_of(&*self.relationships, task_id).await?)
    }

    /// Decides whether `task_id` may be marked complete now.
    ///
    /// Blockers whose task record no longer exists are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionGateError`] when a lookup fails.
    pub async fn can_complete(
        &self,
        task_id: TaskId,
    ) -> Result<CompletionCheck, CompletionGateError> {
        for blocker_id in self.blockers(task_id).await? {
            let Some(blocker) = self.tasks.find_by_id(blocker_id).await? else {
                debug!(task_id = %task_id, blocker_id = %blocker_id, "ignoring missing blocker");
                continue;
            };
            if !blocker.status().is_complete() {
                return Ok(CompletionCheck::Blocked {
                    task_id: blocker.id(),
                    title: blocker.title().to_owned(),
                });
            }
        }
        Ok(CompletionCheck::Allowed)
    }
}
