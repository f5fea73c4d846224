//! When steps for task relationship BDD scenarios.

use super::world::{RelationshipWorld, run_async};
use rstest_bdd_macros::when;
use tasklink::relationship::services::CreateRelationshipRequest;
use tasklink::task::services::UpdateTaskStatusRequest;

#[when(r#"a "{kind}" relationship is created from "{source}" to "{target}""#)]
fn create_relationship(
    world: &mut RelationshipWorld,
    kind: String,
    source: String,
    target: String,
) -> Result<(), eyre::Report> {
    let request =
        CreateRelationshipRequest::new(world.task_id(&source)?, world.task_id(&target)?, kind);
    world.last_relationship_result = Some(run_async(world.relationships.create(request)));
    Ok(())
}

#[when(r#""{title}" is marked "{status}""#)]
fn mark_task(
    world: &mut RelationshipWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let request = UpdateTaskStatusRequest::new(world.task_id(&title)?, status);
    world.last_status_result = Some(run_async(world.tasks.update_status(request)));
    Ok(())
}
