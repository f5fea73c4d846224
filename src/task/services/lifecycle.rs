//! Service layer for task creation, lookup, status changes, and removal.

use crate::relationship::{
    ports::{RelationshipRepository, RelationshipRepositoryError},
    services::{CompletionCheck, CompletionGate, CompletionGateError},
};
use crate::task::{
    domain::{Integration, NewTask, Task, TaskDomainError, TaskFilter, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    status: String,
    integration: String,
    description: Option<String>,
    priority: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        status: impl Into<String>,
        integration: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            status: status.into(),
            integration: integration.into(),
            description: None,
            priority: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Request payload for changing a task's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    task_id: TaskId,
    status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a status change request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Request payload for a partial task update.
///
/// Fields left unset keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            priority: None,
            status: None,
        }
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the new status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

impl From<UpdateTaskStatusRequest> for UpdateTaskRequest {
    fn from(request: UpdateTaskStatusRequest) -> Self {
        Self::new(request.task_id).with_status(request.status)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Completion was refused because an unfinished task blocks this one.
    #[error("Cannot mark as Done: blocked by task '{blocking_title}' which is not Done")]
    Blocked {
        /// Task whose completion was refused.
        task_id: TaskId,
        /// Unfinished blocking task.
        blocking_task_id: TaskId,
        /// Title of the blocking task.
        blocking_title: String,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Relationship repository operation failed.
    #[error(transparent)]
    Relationships(#[from] RelationshipRepositoryError),

    /// The completion gate could not be evaluated.
    #[error(transparent)]
    Gate(#[from] CompletionGateError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<T, R, C>
where
    T: TaskRepository + ?Sized,
    R: RelationshipRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    relationships: Arc<R>,
    gate: CompletionGate<R, T>,
    clock: Arc<C>,
}

impl<T, R, C> Clone for TaskLifecycleService<T, R, C>
where
    T: TaskRepository + ?Sized,
    R: RelationshipRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            relationships: Arc::clone(&self.relationships),
            gate: self.gate.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, R, C> TaskLifecycleService<T, R, C>
where
    T: TaskRepository + ?Sized,
    R: RelationshipRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(tasks: Arc<T>, relationships: Arc<R>, clock: Arc<C>) -> Self {
        let gate = CompletionGate::new(Arc::clone(&relationships), Arc::clone(&tasks));
        Self {
            tasks,
            relationships,
            gate,
            clock,
        }
    }

    /// Creates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when a field is invalid or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let new_task = NewTask {
            title: request.title,
            status: TaskStatus::new(request.status)?,
            integration: Integration::try_from(request.integration.as_str())
                .map_err(TaskDomainError::from)?,
            description: request.description,
            priority: request.priority,
        };
        let task = Task::new(new_task, &*self.clock)?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), integration = %task.integration(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists tasks matching the filter, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list(filter).await?)
    }

    /// Changes a task's status.
    ///
    /// Moving to the terminal `Done` status first consults the completion
    /// gate; any other status is applied directly.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank status,
    /// [`TaskLifecycleError::NotFound`] for a missing task, and
    /// [`TaskLifecycleError::Blocked`] when an unfinished task blocks
    /// completion.
    pub async fn update_status(
        &self,
        request: UpdateTaskStatusRequest,
    ) -> TaskLifecycleResult<Task> {
        self.update(request.into()).await
    }

    /// Applies a partial update to a task.
    ///
    /// Every supplied field is validated before anything is written. The
    /// completion gate runs only when the new status is `Done`; a refused
    /// completion leaves the stored task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank title or status,
    /// [`TaskLifecycleError::NotFound`] for a missing task, and
    /// [`TaskLifecycleError::Blocked`] when an unfinished task blocks
    /// completion.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let status = request.status.map(TaskStatus::new).transpose()?;
        let mut task = self
            .tasks
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(request.task_id))?;

        if let Some(title) = request.title.as_deref() {
            task.retitle(title, &*self.clock)?;
        }
        if status.as_ref().is_some_and(TaskStatus::is_complete) {
            self.ensure_completable(&task).await?;
        }

        if let Some(description) = request.description {
            task.set_description(description, &*self.clock);
        }
        if let Some(priority) = request.priority {
            task.set_priority(priority, &*self.clock);
        }
        if let Some(status) = status {
            task.set_status(status, &*self.clock);
        }
        self.tasks.update(&task).await?;
        info!(task_id = %task.id(), status = %task.status(), "task updated");
        Ok(task)
    }

    async fn ensure_completable(&self, task: &Task) -> TaskLifecycleResult<()> {
        match self.gate.can_complete(task.id()).await? {
            CompletionCheck::Allowed => Ok(()),
            CompletionCheck::Blocked { task_id, title } => {
                warn!(
                    task_id = %task.id(),
                    blocking_task_id = %task_id,
                    "refused completion of blocked task"
                );
                Err(TaskLifecycleError::Blocked {
                    task_id: task.id(),
                    blocking_task_id: task_id,
                    blocking_title: title,
                })
            }
        }
    }

    /// Deletes a task together with every relationship touching it.
    ///
    /// The task row goes first so a failure part-way never leaves a live
    /// task stripped of its edges. Edges left behind by a failed cleanup
    /// dangle harmlessly: the completion gate skips blockers whose record is
    /// gone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        if self.tasks.find_by_id(id).await?.is_none() {
            return Err(TaskLifecycleError::NotFound(id));
        }
        self.tasks.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskLifecycleError::NotFound(missing),
            other => TaskLifecycleError::Repository(other),
        })?;
        let detached = self.relationships.delete_by_task(id).await?;
        info!(task_id = %id, detached, "task deleted");
        Ok(())
    }
}
