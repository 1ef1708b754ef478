//! Shared world state for task lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use charity_hub::identity::{
    adapters::memory::InMemoryIdentityRepository, domain::Actor, services::IdentityService,
};
use charity_hub::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    services::{AccessPolicy, TaskLifecycleError, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Identity service type used by the BDD world.
pub type TestIdentityService = IdentityService<InMemoryIdentityRepository, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub tasks: TestTaskService,
    pub identity: TestIdentityService,
    pub actors: HashMap<String, Actor>,
    pub task_id: Option<TaskId>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl LifecycleWorld {
    /// Creates a world with empty repositories and the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
                AccessPolicy::default(),
            ),
            identity: IdentityService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::new(DefaultClock),
            ),
            actors: HashMap::new(),
            task_id: None,
            last_result: None,
        }
    }

    /// Looks up a registered actor by username.
    ///
    /// # Errors
    ///
    /// Returns an error when no actor was registered under `name`.
    pub fn actor(&self, name: &str) -> eyre::Result<Actor> {
        self.actors
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no actor named {name} in scenario world"))
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been posted yet.
    pub fn task_id(&self) -> eyre::Result<TaskId> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Records the outcome of a lifecycle call.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref task) = result {
            self.task_id = Some(task.id());
        }
        self.last_result = Some(result);
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
