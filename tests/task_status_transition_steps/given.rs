//! Given steps for task status transition BDD scenarios.

use super::world::{StatusTransitionWorld, run_async, user};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{
    authorization::Role, project::ports::ProjectRepository, status::StatusKey,
    task::services::AddTaskRequest,
};

#[given(r#"a signed-in user with roles "{roles}""#)]
fn signed_in_user(world: &mut StatusTransitionWorld, roles: String) -> Result<(), eyre::Report> {
    let parsed = roles
        .split(',')
        .map(Role::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    world.actor = Some(user("actor@test.com", parsed));
    Ok(())
}

#[given(r#"a task in status "{status}""#)]
fn task_in_status(world: &mut StatusTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let key = StatusKey::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    run_async(world.projects.upsert(&world.project)).wrap_err("store scenario project")?;
    let request = AddTaskRequest::new(world.project.id().clone(), "Scenario task").with_status(key);
    let created = run_async(world.service.add_task(&world.setup_manager, request))
        .wrap_err("create task for transition scenario")?;
    world.task = Some(created);
    Ok(())
}
