//! Given steps for task lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use charity_hub::identity::{
    domain::Actor,
    services::{RegisterBenefactorRequest, RegisterCharityRequest},
};
use charity_hub::task::services::CreateTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a charity "{name}""#)]
fn a_charity(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let actor = run_async(async {
        let (user, _) = world.identity.register_user(name.as_str()).await?;
        world
            .identity
            .register_charity(&user, RegisterCharityRequest::new(name.as_str(), "0123456789"))
            .await?;
        world.identity.resolve_actor(&user).await
    })
    .wrap_err("register charity for scenario")?;
    world.actors.insert(name, actor);
    Ok(())
}

#[given(r#"a benefactor "{name}""#)]
fn a_benefactor(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let actor: Actor = run_async(async {
        let (user, _) = world.identity.register_user(name.as_str()).await?;
        world
            .identity
            .register_benefactor(&user, RegisterBenefactorRequest::new())
            .await?;
        world.identity.resolve_actor(&user).await
    })
    .wrap_err("register benefactor for scenario")?;
    world.actors.insert(name, actor);
    Ok(())
}

#[given(r#""{name}" has posted a task titled "{title}""#)]
fn task_posted(
    world: &mut LifecycleWorld,
    name: String,
    title: String,
) -> Result<(), eyre::Report> {
    let actor = world.actor(&name)?;
    let task = run_async(world.tasks.create(&actor, CreateTaskRequest::new(title)))
        .wrap_err("post task for scenario")?;
    world.task_id = Some(task.id());
    Ok(())
}
