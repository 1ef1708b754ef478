//! Shared application state handed to every handler.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::identity::{
    adapters::memory::InMemoryIdentityRepository, ports::IdentityRepository,
    services::IdentityService,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    ports::TaskRepository,
    services::{AccessPolicy, TaskLifecycleService},
};

/// Task service over a type-erased repository.
pub type TaskServiceHandle = TaskLifecycleService<dyn TaskRepository, DefaultClock>;

/// Identity service over a type-erased repository.
pub type IdentityServiceHandle = IdentityService<dyn IdentityRepository, DefaultClock>;

/// Services shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Task lifecycle service.
    pub tasks: TaskServiceHandle,
    /// Registration and authentication service.
    pub identity: IdentityServiceHandle,
}

impl AppState {
    /// Builds state over the given repositories.
    #[must_use]
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        identity_repository: Arc<dyn IdentityRepository>,
        policy: AccessPolicy,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            tasks: TaskLifecycleService::new(task_repository, Arc::clone(&clock), policy),
            identity: IdentityService::new(identity_repository, clock),
        }
    }

    /// Builds state over fresh in-memory repositories.
    #[must_use]
    pub fn in_memory(policy: AccessPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryIdentityRepository::new()),
            policy,
        )
    }
}
