//! In-memory repository for relationship edges.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::relationship::{
    domain::{Relationship, RelationshipFilter, RelationshipId},
    ports::{RelationshipRepository, RelationshipRepositoryError, RelationshipRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory relationship repository.
///
/// Keeps an adjacency index from task to touching edges so graph walks do
/// not scan the whole edge set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelationshipRepository {
    state: Arc<RwLock<InMemoryRelationshipState>>,
}

#[derive(Debug, Default)]
struct InMemoryRelationshipState {
    relationships: BTreeMap<RelationshipId, Relationship>,
    task_index: HashMap<TaskId, Vec<RelationshipId>>,
}

impl InMemoryRelationshipRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryRelationshipState {
    fn has_literal_triple(&self, candidate: &Relationship) -> bool {
        self.relationships.values().any(|existing| {
            existing.id() != candidate.id()
                && existing.source_task_id() == candidate.source_task_id()
                && existing.target_task_id() == candidate.target_task_id()
                && existing.kind() == candidate.kind()
        })
    }

    fn index(&mut self, relationship: &Relationship) {
        let id = relationship.id();
        self.task_index
            .entry(relationship.source_task_id())
            .or_default()
            .push(id);
        if relationship.target_task_id() != relationship.source_task_id() {
            self.task_index
                .entry(relationship.target_task_id())
                .or_default()
                .push(id);
        }
    }

    fn unindex(&mut self, relationship: &Relationship) {
        for task_id in [relationship.source_task_id(), relationship.target_task_id()] {
            if let Some(ids) = self.task_index.get_mut(&task_id) {
                ids.retain(|id| *id != relationship.id());
                if ids.is_empty() {
                    self.task_index.remove(&task_id);
                }
            }
        }
    }

    fn touching(&self, task_id: TaskId) -> Vec<Relationship> {
        let mut found: Vec<Relationship> = self
            .task_index
            .get(&task_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.relationships.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        sort_oldest_first(&mut found);
        found
    }
}

fn sort_oldest_first(relationships: &mut [Relationship]) {
    relationships.sort_by_key(|relationship| (relationship.created_at(), relationship.id()));
}

fn lock_poisoned(err: impl std::fmt::Display) -> RelationshipRepositoryError {
    RelationshipRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RelationshipRepository for InMemoryRelationshipRepository {
    async fn insert(&self, relationship: &Relationship) -> RelationshipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.relationships.contains_key(&relationship.id())
            || state.has_literal_triple(relationship)
        {
            return Err(RelationshipRepositoryError::duplicate_of(relationship));
        }
        state.index(relationship);
        state
            .relationships
            .insert(relationship.id(), relationship.clone());
        Ok(())
    }

    async fn update(&self, relationship: &Relationship) -> RelationshipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.relationships.contains_key(&relationship.id()) {
            return Err(RelationshipRepositoryError::NotFound(relationship.id()));
        }
        if state.has_literal_triple(relationship) {
            return Err(RelationshipRepositoryError::duplicate_of(relationship));
        }
        // Endpoints never change on update, so the task index stays valid.
        state
            .relationships
            .insert(relationship.id(), relationship.clone());
        Ok(())
    }

    async fn delete(&self, id: RelationshipId) -> RelationshipRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let removed = state
            .relationships
            .remove(&id)
            .ok_or(RelationshipRepositoryError::NotFound(id))?;
        state.unindex(&removed);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: RelationshipId,
    ) -> RelationshipRepositoryResult<Option<Relationship>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.relationships.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &RelationshipFilter,
    ) -> RelationshipRepositoryResult<Vec<Relationship>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut found: Vec<Relationship> = state
            .relationships
            .values()
            .filter(|relationship| filter.matches(relationship))
            .cloned()
            .collect();
        sort_oldest_first(&mut found);
        Ok(found)
    }

    async fn find_by_task(&self, task_id: TaskId) -> RelationshipRepositoryResult<Vec<Relationship>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.touching(task_id))
    }

    async fn delete_by_task(&self, task_id: TaskId) -> RelationshipRepositoryResult<usize> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let touching = state.touching(task_id);
        for relationship in &touching {
            state.relationships.remove(&relationship.id());
            state.unindex(relationship);
        }
        Ok(touching.len())
    }
}
