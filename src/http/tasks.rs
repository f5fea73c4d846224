//! Task handlers.

use super::{ApiError, AppState, CreatedResponse, MessageResponse};
use crate::task::{
    domain::{Integration, Task, TaskDomainError, TaskFilter, TaskId, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListTasksQuery {
    status: Option<String>,
    integration: Option<String>,
    priority: Option<String>,
    search: Option<String>,
    exclude_meetings: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateTaskBody {
    title: String,
    status: String,
    integration: String,
    description: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UpdateTaskBody {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
}

impl UpdateTaskBody {
    fn into_request(self, task_id: TaskId) -> UpdateTaskRequest {
        let mut request = UpdateTaskRequest::new(task_id);
        if let Some(title) = self.title {
            request = request.with_title(title);
        }
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if let Some(status) = self.status {
            request = request.with_status(status);
        }
        request
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskResponse {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: String,
    integration: Integration,
    priority: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().as_str().to_owned(),
            integration: task.integration(),
            priority: task.priority().map(str::to_owned),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

pub(super) fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse()
        .map_err(|err| ApiError::InvalidArgument(format!("invalid task id '{raw}': {err}")))
}

fn build_filter(query: ListTasksQuery) -> Result<TaskFilter, ApiError> {
    let mut filter = TaskFilter::new();
    if let Some(status) = query.status.filter(|value| !value.trim().is_empty()) {
        let status = TaskStatus::new(status)
            .map_err(|err| ApiError::InvalidArgument(err.to_string()))?;
        filter = filter.with_status(status);
    }
    if let Some(integration) = query.integration.filter(|value| !value.trim().is_empty()) {
        let integration = Integration::try_from(integration.as_str())
            .map_err(|err| ApiError::InvalidArgument(TaskDomainError::from(err).to_string()))?;
        filter = filter.with_integration(integration);
    }
    if let Some(priority) = query.priority.filter(|value| !value.is_empty()) {
        filter = filter.with_priority(priority);
    }
    if let Some(search) = query.search.filter(|value| !value.is_empty()) {
        filter = filter.with_search(search);
    }
    if query.exclude_meetings.as_deref() == Some("true") {
        filter = filter.excluding_meetings();
    }
    Ok(filter)
}

pub(super) async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let Query(query) = query?;
    let filter = build_filter(query)?;
    let tasks = state.tasks.list(&filter).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

pub(super) async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(body) = body?;
    let mut request = CreateTaskRequest::new(body.title, body.status, body.integration);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(priority) = body.priority {
        request = request.with_priority(priority);
    }
    let task = state.tasks.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: task.id().to_string(),
        }),
    ))
}

pub(super) async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let task = state
        .tasks
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("task {task_id} not found")))?;
    Ok(Json(TaskResponse::from(task)))
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let Json(body) = body?;
    state.tasks.update(body.into_request(task_id)).await?;
    Ok(Json(MessageResponse {
        message: "Task updated",
    }))
}

pub(super) async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let task_id = parse_task_id(&id)?;
    state.tasks.delete(task_id).await?;
    Ok(Json(MessageResponse {
        message: "Task and connected relationships deleted",
    }))
}
