//! When steps for task status transition BDD scenarios.

use super::world::{StatusTransitionWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::status::StatusKey;

#[when(r#"the user moves the task to "{target}""#)]
fn move_task(world: &mut StatusTransitionWorld, target: String) -> Result<(), eyre::Report> {
    let proposed = StatusKey::try_from(target.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let actor = world
        .actor
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing actor in scenario world"))?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let result = run_async(world.service.change_status(actor, task.id(), proposed));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}
