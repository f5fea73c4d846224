//! Given steps for task relationship BDD scenarios.

use super::world::{RelationshipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklink::relationship::services::CreateRelationshipRequest;
use tasklink::task::services::CreateTaskRequest;

#[given(r#"a task "{title}" with status "{status}""#)]
fn task_with_status(
    world: &mut RelationshipWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.tasks.create(CreateTaskRequest::new(
        title.clone(),
        status,
        "github",
    )))
    .wrap_err("create task for relationship scenario")?;
    world.task_ids.insert(title, created.id());
    Ok(())
}

#[given(r#"a "{kind}" relationship from "{source}" to "{target}""#)]
fn existing_relationship(
    world: &mut RelationshipWorld,
    kind: String,
    source: String,
    target: String,
) -> Result<(), eyre::Report> {
    let request =
        CreateRelationshipRequest::new(world.task_id(&source)?, world.task_id(&target)?, kind);
    run_async(world.relationships.create(request))
        .wrap_err("create relationship in scenario setup")?;
    Ok(())
}
