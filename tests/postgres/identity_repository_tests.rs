//! `PostgreSQL` integration tests for identity persistence.

use std::sync::Arc;

use charity_hub::identity::{
    adapters::postgres::PostgresIdentityRepository,
    domain::{AuthToken, Experience},
    ports::{IdentityRepositoryError, ProfileKind},
    services::{
        IdentityService, IdentityServiceError, RegisterBenefactorRequest, RegisterCharityRequest,
    },
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{BoxError, IsolatedSchema, isolated_schema};

fn service(schema: &IsolatedSchema) -> IdentityService<PostgresIdentityRepository, DefaultClock> {
    IdentityService::new(
        Arc::new(PostgresIdentityRepository::new(schema.pool())),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_token_authenticates_and_resolves_roles(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let identity = service(&schema);

    let (user, token) = identity.register_user("pg-user").await?;
    let benefactor = identity
        .register_benefactor(
            &user,
            RegisterBenefactorRequest::new()
                .with_experience(2)
                .with_free_time_per_week(12),
        )
        .await?;
    let charity = identity
        .register_charity(&user, RegisterCharityRequest::new("Both Ways", "5556667778"))
        .await?;

    let authenticated = identity
        .authenticate(&AuthToken::from_presented(token.expose()))
        .await?;
    assert_eq!(authenticated.id(), user.id());
    assert_eq!(authenticated.username(), user.username());

    let actor = identity.resolve_actor(&authenticated).await?;
    assert_eq!(actor.benefactor_id(), Some(benefactor.id()));
    assert_eq!(actor.charity_id(), Some(charity.id()));
    assert_eq!(benefactor.experience(), Experience::Expert);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_enforces_unique_username_and_profiles(
    #[future] isolated_schema: Result<Option<IsolatedSchema>, BoxError>,
) -> Result<(), BoxError> {
    let Some(schema) = isolated_schema.await? else {
        return Ok(());
    };
    let identity = service(&schema);

    let (user, _) = identity.register_user("pg-unique").await?;
    let duplicate_user = identity.register_user("pg-unique").await;
    assert!(matches!(
        duplicate_user,
        Err(IdentityServiceError::Repository(
            IdentityRepositoryError::DuplicateUsername(_)
        ))
    ));

    identity
        .register_charity(&user, RegisterCharityRequest::new("Once", "0000000001"))
        .await?;
    let duplicate_charity = identity
        .register_charity(&user, RegisterCharityRequest::new("Twice", "0000000002"))
        .await;
    assert!(matches!(
        duplicate_charity,
        Err(IdentityServiceError::Repository(
            IdentityRepositoryError::DuplicateProfile {
                kind: ProfileKind::Charity,
                ..
            }
        ))
    ));

    let unknown = identity.authenticate(&AuthToken::generate()).await;
    assert!(matches!(unknown, Err(IdentityServiceError::Unauthenticated)));
    Ok(())
}
