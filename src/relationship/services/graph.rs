//! Reachability over canonical dependency edges.
//!
//! Both the relationship store and the completion gate read the graph
//! through these helpers, so `blocked-by` and `child-of` edges are always
//! walked in their logical direction rather than their stored one.

use crate::relationship::{
    domain::{CanonicalEdge, DependencyKind, RelationshipId},
    ports::{RelationshipRepository, RelationshipRepositoryResult},
};
use crate::task::domain::TaskId;
use std::collections::{BTreeSet, HashSet};

/// Returns `true` when a path of `kind` edges leads from `from` to `to`.
///
/// The walk is a depth-first search with a visited set, so it terminates on
/// any stored graph and touches each reachable edge at most once. The edge
/// named by `excluded` is skipped, which lets an update re-check the graph
/// as if the edge being redefined were absent.
pub(crate) async fn dependency_path_exists<R>(
    repository: &R,
    kind: DependencyKind,
    from: TaskId,
    to: TaskId,
    excluded: Option<RelationshipId>,
) -> RelationshipRepositoryResult<bool>
where
    R: RelationshipRepository + ?Sized,
{
    let mut visited = HashSet::new();
    let mut pending = vec![from];

    while let Some(current) = pending.pop() {
        if current == to {
            return Ok(true);
        }
        if !visited.insert(current) {
            continue;
        }
        for relationship in repository.find_by_task(current).await? {
            if excluded == Some(relationship.id()) {
                continue;
            }
            let Some(edge) = relationship.canonical() else {
                continue;
            };
            if edge.kind == kind && edge.source == current && !visited.contains(&edge.target) {
                pending.push(edge.target);
            }
        }
    }
    Ok(false)
}

/// Returns the tasks that logically block `task_id`, merging `blocks` edges
/// pointing at it and `blocked-by` edges leaving it.
pub(crate) async fn blockers_of<R>(
    repository: &R,
    task_id: TaskId,
) -> RelationshipRepositoryResult<Vec<TaskId>>
where
    R: RelationshipRepository + ?Sized,
{
    let blockers: BTreeSet<TaskId> = repository
        .find_by_task(task_id)
        .await?
        .iter()
        .filter_map(|relationship| relationship.canonical())
        .filter(|edge| edge.kind == DependencyKind::Blocks && edge.target == task_id)
        .map(|edge: CanonicalEdge| edge.source)
        .collect();
    Ok(blockers.into_iter().collect())
}
