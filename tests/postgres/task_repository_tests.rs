//! `PostgreSQL` integration tests for task persistence and guarded updates.

use std::sync::Arc;

use charity_hub::identity::{
    adapters::postgres::PostgresIdentityRepository,
    domain::Actor,
    services::{IdentityService, RegisterBenefactorRequest, RegisterCharityRequest},
};
use charity_hub::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{ResponseDecision, TaskId, TaskQuery, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
    services::{AccessPolicy, CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{BoxError, IsolatedSchema, isolated_schema};

struct TaskTestContext {
    repository: Arc<PostgresTaskRepository>,
    tasks: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
    identity: IdentityService<PostgresIdentityRepository, DefaultClock>,
    _schema: IsolatedSchema,
}

impl TaskTestContext {
    fn new(schema: IsolatedSchema) -> Self {
        let repository = Arc::new(PostgresTaskRepository::new(schema.pool()));
        let tasks = TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(DefaultClock),
            AccessPolicy::default(),
        );
        let identity = IdentityService::new(
            Arc::new(PostgresIdentityRepository::new(schema.pool())),
            Arc::new(DefaultClock),
        );
        Self {
            repository,
            tasks,
            identity,
            _schema: schema,
        }
    }

    async fn charity_owner(&self, username: &str) -> Result<Actor, BoxError> {
        let (user, _) = self.identity.register_user(username).await?;
        self.identity
            .register_charity(&user, RegisterCharityRequest::new(username, "1112223334"))
            .await?;
        Ok(self.identity.resolve_actor(&user).await?)
    }

    async fn benefactor(&self, username: &str) -> Result<Actor, BoxError> {
        let (user, _) = self.identity.register_user(username).await?;
        self.identity
            .register_benefactor(&user, RegisterBenefactorRequest::new().with_experience(1))
            .await?;
        Ok(self.identity.resolve_actor(&user).await?)
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_round_trip_persists_every_transition(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let context = TaskTestContext::new(schema);
    let charity = context.charity_owner("pg-charity").await?;
    let helper = context.benefactor("pg-helper").await?;

    let request = CreateTaskRequest::new("Pack food boxes")
        .with_description("Warehouse B")
        .with_age_limits(Some(16), Some(70))
        .with_gender_limit("MF");
    let created = context.tasks.create(&charity, request).await?;

    let stored = context.tasks.find(created.id()).await?;
    assert_eq!(stored.details(), created.details());
    assert_eq!(stored.state(), TaskState::Pending);

    context.tasks.request(created.id(), &helper).await?;
    context.tasks.respond(created.id(), &charity, "A").await?;
    context.tasks.complete(created.id(), &helper).await?;

    let done = context.tasks.find(created.id()).await?;
    assert_eq!(done.state(), TaskState::Done);
    assert_eq!(done.assigned_benefactor(), None);
    assert_eq!(done.completed_by(), helper.benefactor_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_conditional_update_reports_conflict(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let context = TaskTestContext::new(schema);
    let charity = context.charity_owner("pg-race").await?;
    let first = context.benefactor("pg-first").await?;
    let second = context.benefactor("pg-second").await?;
    let task = context
        .tasks
        .create(&charity, CreateTaskRequest::new("Contested"))
        .await?;

    let stale = context.tasks.find(task.id()).await?;
    let loaded = stale.revision();
    context.tasks.request(task.id(), &first).await?;

    let mut late = stale;
    let second_id = second
        .benefactor_id()
        .ok_or("second actor should be a benefactor")?;
    late.request(second_id, &DefaultClock)?;
    let result = context
        .repository
        .update_if_current(&late, loaded)
        .await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::StateConflict {
            expected: TaskState::Pending,
            ..
        })
    ));
    let stored = context.tasks.find(task.id()).await?;
    assert_eq!(stored.assigned_benefactor(), first.benefactor_id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_stale_answer_after_rerequest_is_refused(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let context = TaskTestContext::new(schema);
    let charity = context.charity_owner("pg-aba").await?;
    let first = context.benefactor("pg-aba-first").await?;
    let second = context.benefactor("pg-aba-second").await?;
    let task = context
        .tasks
        .create(&charity, CreateTaskRequest::new("Reopened"))
        .await?;
    context.tasks.request(task.id(), &first).await?;

    let stale = context.tasks.find(task.id()).await?;
    let loaded = stale.revision();
    context.tasks.respond(task.id(), &charity, "R").await?;
    context.tasks.request(task.id(), &second).await?;

    let mut late = stale;
    late.respond(ResponseDecision::Accept, &DefaultClock)?;
    let result = context.repository.update_if_current(&late, loaded).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::StateConflict {
            expected: TaskState::Waiting,
            ..
        })
    ));
    let stored = context.tasks.find(task.id()).await?;
    assert_eq!(stored.state(), TaskState::Waiting);
    assert_eq!(stored.assigned_benefactor(), second.benefactor_id());
    assert_eq!(stored.version(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_concurrent_requests_admit_one(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let context = TaskTestContext::new(schema);
    let charity = context.charity_owner("pg-busy").await?;
    let task = context
        .tasks
        .create(&charity, CreateTaskRequest::new("Popular"))
        .await?;

    let mut handles = Vec::new();
    for index in 0..4 {
        let actor = context.benefactor(&format!("pg-racer-{index}")).await?;
        let tasks = context.tasks.clone();
        let task_id = task.id();
        handles.push(tokio::spawn(
            async move { tasks.request(task_id, &actor).await },
        ));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await? {
            Ok(_) => winners += 1,
            Err(TaskLifecycleError::InvalidState { .. }) => {}
            Err(other) => return Err(other.into()),
        }
    }
    assert_eq!(winners, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_listing_matches_visibility_and_query(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let context = TaskTestContext::new(schema);
    let owner = context.charity_owner("pg-owner").await?;
    let helper = context.benefactor("pg-viewer").await?;
    let open = context
        .tasks
        .create(
            &owner,
            CreateTaskRequest::new("100% fresh_produce")
                .with_age_limits(Some(18), None)
                .with_gender_limit("F"),
        )
        .await?;
    let held = context
        .tasks
        .create(&owner, CreateTaskRequest::new("Held back"))
        .await?;
    context.tasks.request(held.id(), &helper).await?;

    let everything = context.tasks.list(&owner, &TaskQuery::new()).await?;
    assert_eq!(everything.len(), 2);

    let public_view = context
        .identity
        .register_user("pg-anon")
        .await
        .map(|(user, _)| Actor::new(user.id()))?;
    let visible: Vec<TaskId> = context
        .tasks
        .list(&public_view, &TaskQuery::new())
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    assert_eq!(visible, vec![open.id()]);

    let literal = TaskQuery::from_params([("title", "100% FRESH_")]);
    assert_eq!(context.tasks.list(&owner, &literal).await?.len(), 1);
    let wildcard = TaskQuery::from_params([("title", "1_0")]);
    assert!(context.tasks.list(&owner, &wildcard).await?.is_empty());

    let young = TaskQuery::from_params([("age", "12"), ("gender", "F")]);
    assert!(context.tasks.list(&owner, &young).await?.is_empty());

    let held_only = TaskQuery::from_params([("state", "W")]);
    let mine: Vec<TaskId> = context
        .tasks
        .list(&helper, &held_only)
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    assert_eq!(mine, vec![held.id()]);
    Ok(())
}
