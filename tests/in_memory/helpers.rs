//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use charity_hub::identity::{
    adapters::memory::InMemoryIdentityRepository,
    domain::Actor,
    services::{IdentityService, RegisterBenefactorRequest, RegisterCharityRequest},
};
use charity_hub::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{AccessPolicy, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Task service over the in-memory repository.
pub type TaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Identity service over the in-memory repository.
pub type Identities = IdentityService<InMemoryIdentityRepository, DefaultClock>;

/// Both services wired to fresh repositories.
pub struct Hub {
    pub tasks: TaskService,
    pub identity: Identities,
}

impl Hub {
    /// Creates a hub using `policy` for access checks.
    #[must_use]
    pub fn with_policy(policy: AccessPolicy) -> Self {
        Self {
            tasks: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
                policy,
            ),
            identity: IdentityService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::new(DefaultClock),
            ),
        }
    }

    /// Registers a user holding a charity profile.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn charity_owner(&self, username: &str) -> eyre::Result<Actor> {
        let (user, _) = self.identity.register_user(username).await?;
        self.identity
            .register_charity(&user, RegisterCharityRequest::new(username, "0123456789"))
            .await?;
        Ok(self.identity.resolve_actor(&user).await?)
    }

    /// Registers a user holding a benefactor profile.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn benefactor(&self, username: &str) -> eyre::Result<Actor> {
        let (user, _) = self.identity.register_user(username).await?;
        self.identity
            .register_benefactor(&user, RegisterBenefactorRequest::new())
            .await?;
        Ok(self.identity.resolve_actor(&user).await?)
    }

    /// Registers a user holding no role profile.
    ///
    /// # Errors
    ///
    /// Returns an error when registration fails.
    pub async fn plain_user(&self, username: &str) -> eyre::Result<Actor> {
        let (user, _) = self.identity.register_user(username).await?;
        Ok(self.identity.resolve_actor(&user).await?)
    }
}

/// Provides a hub with the default access policy.
#[fixture]
pub fn hub() -> Hub {
    Hub::with_policy(AccessPolicy::default())
}
