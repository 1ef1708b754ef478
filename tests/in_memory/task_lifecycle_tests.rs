//! In-memory integration tests for task lifecycle operations.

use charity_hub::task::{
    domain::TaskState,
    services::{AccessPolicy, CompletionPolicy, CreateTaskRequest, TaskLifecycleError},
};
use eyre::ensure;
use rstest::rstest;

use super::helpers::{Hub, hub};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reject_then_rerequest_by_another_benefactor(hub: Hub) -> eyre::Result<()> {
    let charity = hub.charity_owner("shelter").await?;
    let first = hub.benefactor("first").await?;
    let second = hub.benefactor("second").await?;

    let task = hub
        .tasks
        .create(&charity, CreateTaskRequest::new("Walk dogs"))
        .await?;

    let waiting = hub.tasks.request(task.id(), &first).await?;
    ensure!(waiting.state() == TaskState::Waiting);
    ensure!(waiting.assigned_benefactor() == first.benefactor_id());

    let reopened = hub.tasks.respond(task.id(), &charity, "R").await?;
    ensure!(reopened.state() == TaskState::Pending);
    ensure!(reopened.assigned_benefactor().is_none());

    let rerequested = hub.tasks.request(task.id(), &second).await?;
    ensure!(rerequested.state() == TaskState::Waiting);
    ensure!(rerequested.assigned_benefactor() == second.benefactor_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_task_is_completed_by_any_user(hub: Hub) -> eyre::Result<()> {
    let charity = hub.charity_owner("kitchen").await?;
    let helper = hub.benefactor("helper").await?;
    let bystander = hub.plain_user("bystander").await?;

    let task = hub
        .tasks
        .create(&charity, CreateTaskRequest::new("Cook dinner"))
        .await?;
    hub.tasks.request(task.id(), &helper).await?;
    hub.tasks.respond(task.id(), &charity, "A").await?;

    let done = hub.tasks.complete(task.id(), &bystander).await?;
    ensure!(done.state() == TaskState::Done);
    ensure!(done.completed_by() == helper.benefactor_id());
    ensure!(done.assigned_benefactor().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn participant_policy_admits_assigned_benefactor_only() -> eyre::Result<()> {
    let hub = Hub::with_policy(AccessPolicy::new(CompletionPolicy::Participant));
    let charity = hub.charity_owner("library").await?;
    let helper = hub.benefactor("reader").await?;
    let other = hub.benefactor("other").await?;

    let task = hub
        .tasks
        .create(&charity, CreateTaskRequest::new("Shelve books"))
        .await?;
    hub.tasks.request(task.id(), &helper).await?;
    hub.tasks.respond(task.id(), &charity, "A").await?;

    let denied = hub.tasks.complete(task.id(), &other).await;
    ensure!(matches!(denied, Err(TaskLifecycleError::PermissionDenied(_))));

    let done = hub.tasks.complete(task.id(), &helper).await?;
    ensure!(done.state() == TaskState::Done);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_cannot_be_completed_again(hub: Hub) -> eyre::Result<()> {
    let charity = hub.charity_owner("garden").await?;
    let helper = hub.benefactor("gardener").await?;
    let task = hub
        .tasks
        .create(&charity, CreateTaskRequest::new("Plant trees"))
        .await?;
    hub.tasks.request(task.id(), &helper).await?;
    hub.tasks.respond(task.id(), &charity, "A").await?;
    hub.tasks.complete(task.id(), &helper).await?;

    let again = hub.tasks.complete(task.id(), &helper).await;
    ensure!(matches!(
        again,
        Err(TaskLifecycleError::InvalidState {
            required: TaskState::Assigned,
            ..
        })
    ));
    let rerequest = hub.tasks.request(task.id(), &helper).await;
    ensure!(matches!(
        rerequest,
        Err(TaskLifecycleError::InvalidState {
            required: TaskState::Pending,
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_responses_apply_once(hub: Hub) -> eyre::Result<()> {
    let charity = hub.charity_owner("clinic").await?;
    let helper = hub.benefactor("nurse").await?;
    let task = hub
        .tasks
        .create(&charity, CreateTaskRequest::new("Triage"))
        .await?;
    hub.tasks.request(task.id(), &helper).await?;

    let accept = hub.tasks.respond(task.id(), &charity, "A");
    let reject = hub.tasks.respond(task.id(), &charity, "R");
    let (accepted, rejected) = tokio::join!(accept, reject);

    ensure!(
        accepted.is_ok() != rejected.is_ok(),
        "exactly one response should land"
    );
    let stored = hub.tasks.find(task.id()).await?;
    let expected = if accepted.is_ok() {
        TaskState::Assigned
    } else {
        TaskState::Pending
    };
    ensure!(stored.state() == expected);
    Ok(())
}
