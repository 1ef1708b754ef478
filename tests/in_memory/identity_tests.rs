//! In-memory integration tests for identity flows feeding task operations.

use charity_hub::identity::{
    domain::AuthToken,
    services::{IdentityServiceError, RegisterCharityRequest},
};
use charity_hub::task::services::{CreateTaskRequest, TaskLifecycleError, TaskOperation};
use eyre::ensure;
use rstest::rstest;

use super::helpers::{Hub, hub};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn token_resolves_to_actor_with_charity(hub: Hub) -> eyre::Result<()> {
    let (user, token) = hub.identity.register_user("owner").await?;
    let charity = hub
        .identity
        .register_charity(&user, RegisterCharityRequest::new("Open Arms", "9876543210"))
        .await?;

    let presented = AuthToken::from_presented(token.expose());
    let authenticated = hub.identity.authenticate(&presented).await?;
    let actor = hub.identity.resolve_actor(&authenticated).await?;

    ensure!(actor.charity_id() == Some(charity.id()));
    let task = hub
        .tasks
        .create(&actor, CreateTaskRequest::new("Hand out blankets"))
        .await?;
    ensure!(task.charity_id() == charity.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn benefactor_without_charity_cannot_post(hub: Hub) -> eyre::Result<()> {
    let benefactor = hub.benefactor("volunteer").await?;
    let result = hub
        .tasks
        .create(&benefactor, CreateTaskRequest::new("Sneaky"))
        .await;
    ensure!(matches!(
        result,
        Err(TaskLifecycleError::PermissionDenied(TaskOperation::CreateTask))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn forged_token_is_rejected(hub: Hub) -> eyre::Result<()> {
    hub.identity.register_user("real").await?;
    let forged = AuthToken::from_presented("0".repeat(64));
    let result = hub.identity.authenticate(&forged).await;
    ensure!(matches!(result, Err(IdentityServiceError::Unauthenticated)));
    Ok(())
}
