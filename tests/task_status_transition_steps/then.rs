//! Then steps for task status transition BDD scenarios.

use std::collections::BTreeSet;

use super::world::{StatusTransitionWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::{status::StatusKey, task::services::TaskLifecycleError};

fn offered(world: &StatusTransitionWorld) -> Result<BTreeSet<StatusKey>, eyre::Report> {
    let actor = world
        .actor
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing actor"))?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    Ok(run_async(world.service.available_statuses(actor, task.id()))?)
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &StatusTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = StatusKey::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    let stored = run_async(world.service.find_by_id(task.id()))?
        .ok_or_else(|| eyre::eyre!("task vanished from repository"))?;

    let actual = world.registry.resolve(stored.status().as_str());
    eyre::ensure!(
        actual == Some(expected),
        "expected status {expected}, found {actual:?}"
    );
    Ok(())
}

#[then("the transition is denied")]
fn transition_is_denied(world: &StatusTransitionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(result, Err(TaskLifecycleError::TransitionDenied { .. })) {
        return Err(eyre::eyre!("expected TransitionDenied error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the available statuses are "{statuses}""#)]
fn available_statuses_are(
    world: &StatusTransitionWorld,
    statuses: String,
) -> Result<(), eyre::Report> {
    let expected = statuses
        .split(',')
        .map(StatusKey::try_from)
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let actual = offered(world)?;
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the user has no available statuses")]
fn no_available_statuses(world: &StatusTransitionWorld) -> Result<(), eyre::Report> {
    let actual = offered(world)?;
    eyre::ensure!(actual.is_empty(), "expected no statuses, found {actual:?}");
    Ok(())
}
