//! Then steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use charity_hub::task::{
    domain::{Task, TaskState},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

fn current_task(world: &LifecycleWorld) -> Result<Task, eyre::Report> {
    let task_id = world.task_id()?;
    Ok(run_async(world.tasks.find(task_id))?)
}

fn last_error(world: &LifecycleWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(task)) => Err(eyre::eyre!("expected a failure, got {task:?}")),
        None => Err(eyre::eyre!("missing lifecycle result")),
    }
}

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &LifecycleWorld, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let task = current_task(world)?;
    if task.state() != expected {
        return Err(eyre::eyre!(
            "expected state {}, found {}",
            expected.as_str(),
            task.state().as_str()
        ));
    }
    Ok(())
}

#[then("the task has no assigned benefactor")]
fn task_unassigned(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let task = current_task(world)?;
    if let Some(benefactor) = task.assigned_benefactor() {
        return Err(eyre::eyre!("task still held by {benefactor}"));
    }
    Ok(())
}

#[then(r#"the task is assigned to "{name}""#)]
fn task_assigned_to(world: &LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.actor(&name)?.benefactor_id();
    let task = current_task(world)?;
    if task.assigned_benefactor() != expected || expected.is_none() {
        return Err(eyre::eyre!(
            "expected {name} to hold the task, found {:?}",
            task.assigned_benefactor()
        ));
    }
    Ok(())
}

#[then(r#"the task was completed by "{name}""#)]
fn task_completed_by(world: &LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let expected = world.actor(&name)?.benefactor_id();
    let task = current_task(world)?;
    if task.completed_by() != expected || expected.is_none() {
        return Err(eyre::eyre!(
            "expected {name} to be recorded as completer, found {:?}",
            task.completed_by()
        ));
    }
    Ok(())
}

#[then(r#"the operation fails because the task is not "{state}""#)]
fn fails_with_invalid_state(world: &LifecycleWorld, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let err = last_error(world)?;
    if !matches!(err, TaskLifecycleError::InvalidState { required, .. } if *required == expected) {
        return Err(eyre::eyre!(
            "expected InvalidState({}), got {err:?}",
            expected.as_str()
        ));
    }
    Ok(())
}

#[then("the operation fails with an invalid argument")]
fn fails_with_invalid_argument(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, TaskLifecycleError::InvalidArgument(_)) {
        return Err(eyre::eyre!("expected InvalidArgument, got {err:?}"));
    }
    Ok(())
}

#[then("the operation is not permitted")]
fn fails_with_permission_denied(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, TaskLifecycleError::PermissionDenied(_)) {
        return Err(eyre::eyre!("expected PermissionDenied, got {err:?}"));
    }
    Ok(())
}
