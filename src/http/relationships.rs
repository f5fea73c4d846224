//! Relationship handlers.

use super::tasks::parse_task_id;
use super::{ApiError, AppState, CreatedResponse, MessageResponse};
use crate::relationship::{
    domain::{Relationship, RelationshipDomainError, RelationshipFilter, RelationshipId, RelationshipKind},
    services::CreateRelationshipRequest,
};
use crate::task::domain::TaskId;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListRelationshipsQuery {
    source_task_id: Option<String>,
    target_task_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateRelationshipBody {
    source_task_id: String,
    target_task_id: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateRelationshipBody {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RelationshipResponse {
    id: RelationshipId,
    source_task_id: TaskId,
    target_task_id: TaskId,
    #[serde(rename = "type")]
    kind: RelationshipKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Relationship> for RelationshipResponse {
    fn from(relationship: Relationship) -> Self {
        Self {
            id: relationship.id(),
            source_task_id: relationship.source_task_id(),
            target_task_id: relationship.target_task_id(),
            kind: relationship.kind(),
            created_at: relationship.created_at(),
            updated_at: relationship.updated_at(),
        }
    }
}

fn parse_relationship_id(raw: &str) -> Result<RelationshipId, ApiError> {
    raw.parse().map_err(|err| {
        ApiError::InvalidArgument(format!("invalid relationship id '{raw}': {err}"))
    })
}

fn build_filter(query: &ListRelationshipsQuery) -> Result<RelationshipFilter, ApiError> {
    let mut filter = RelationshipFilter::new();
    if let Some(source) = query.source_task_id.as_deref().filter(|value| !value.is_empty()) {
        filter = filter.with_source(parse_task_id(source)?);
    }
    if let Some(target) = query.target_task_id.as_deref().filter(|value| !value.is_empty()) {
        filter = filter.with_target(parse_task_id(target)?);
    }
    if let Some(kind) = query.kind.as_deref().filter(|value| !value.is_empty()) {
        let kind = RelationshipKind::try_from(kind).map_err(|err| {
            ApiError::InvalidArgument(RelationshipDomainError::from(err).to_string())
        })?;
        filter = filter.with_kind(kind);
    }
    Ok(filter)
}

pub(super) async fn list_relationships(
    State(state): State<AppState>,
    query: Result<Query<ListRelationshipsQuery>, QueryRejection>,
) -> Result<Json<Vec<RelationshipResponse>>, ApiError> {
    let Query(query) = query?;
    let filter = build_filter(&query)?;
    let relationships = state.relationships.list(&filter).await?;
    Ok(Json(
        relationships
            .into_iter()
            .map(RelationshipResponse::from)
            .collect(),
    ))
}

pub(super) async fn create_relationship(
    State(state): State<AppState>,
    body: Result<Json<CreateRelationshipBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(body) = body?;
    let source = parse_task_id(&body.source_task_id)?;
    let target = parse_task_id(&body.target_task_id)?;
    let relationship = state
        .relationships
        .create(CreateRelationshipRequest::new(source, target, body.kind))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: relationship.id().to_string(),
        }),
    ))
}

pub(super) async fn get_relationship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RelationshipResponse>, ApiError> {
    let relationship_id = parse_relationship_id(&id)?;
    let relationship = state
        .relationships
        .find_by_id(relationship_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("relationship {relationship_id} not found")))?;
    Ok(Json(RelationshipResponse::from(relationship)))
}

pub(super) async fn update_relationship(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateRelationshipBody>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let relationship_id = parse_relationship_id(&id)?;
    let Json(body) = body?;
    state
        .relationships
        .update(relationship_id, &body.kind)
        .await?;
    Ok(Json(MessageResponse {
        message: "Relationship updated",
    }))
}

pub(super) async fn delete_relationship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let relationship_id = parse_relationship_id(&id)?;
    state.relationships.delete(relationship_id).await?;
    Ok(Json(MessageResponse {
        message: "Relationship deleted",
    }))
}
