//! Service layer for task creation, listing, and lifecycle transitions.

use super::access::{AccessPolicy, TaskOperation};
use crate::identity::domain::{Actor, CharityId};
use crate::task::{
    domain::{
        AgeLimits, GenderLimit, ResponseDecision, Task, TaskDetails, TaskDomainError, TaskId,
        TaskQuery, TaskState, TaskTitle, TaskVisibility,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for posting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    date: Option<NaiveDate>,
    age_limit_from: Option<u16>,
    age_limit_to: Option<u16>,
    gender_limit: Option<String>,
    charity_id: Option<CharityId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: None,
            age_limit_from: None,
            age_limit_to: None,
            gender_limit: None,
            charity_id: None,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the date the task takes place.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the inclusive age bounds.
    #[must_use]
    pub const fn with_age_limits(mut self, from: Option<u16>, to: Option<u16>) -> Self {
        self.age_limit_from = from;
        self.age_limit_to = to;
        self
    }

    /// Sets the gender limit code (`M`, `F` or `MF`).
    #[must_use]
    pub fn with_gender_limit(mut self, gender_limit: impl Into<String>) -> Self {
        self.gender_limit = Some(gender_limit.into());
        self
    }

    /// Records a charity named by the client.
    ///
    /// The owning charity is always taken from the caller, so this value is
    /// only logged when it disagrees.
    #[must_use]
    pub const fn with_charity_id(mut self, charity_id: CharityId) -> Self {
        self.charity_id = Some(charity_id);
        self
    }

    fn into_details(self) -> Result<TaskDetails, TaskDomainError> {
        let mut details = TaskDetails::new(TaskTitle::new(self.title)?)
            .with_age_limits(AgeLimits::new(self.age_limit_from, self.age_limit_to)?);
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        if let Some(date) = self.date {
            details = details.with_date(date);
        }
        if let Some(code) = self.gender_limit {
            details = details.with_gender_limit(GenderLimit::try_from(code.as_str())?);
        }
        Ok(details)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Task attributes failed validation.
    #[error(transparent)]
    Validation(TaskDomainError),

    /// A request argument is missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task is not in the state the action requires.
    #[error("task {task_id} is not {required:?}")]
    InvalidState {
        /// Task identifier.
        task_id: TaskId,
        /// State the action requires.
        required: TaskState,
    },

    /// The caller lacks the role or ownership the action requires.
    #[error("permission denied: {0}")]
    PermissionDenied(TaskOperation),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl From<TaskDomainError> for TaskLifecycleError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::InvalidState {
                task_id, required, ..
            } => Self::InvalidState { task_id, required },
            TaskDomainError::InvalidDecision(_) => Self::InvalidArgument(err.to_string()),
            other => Self::Validation(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: AccessPolicy,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, policy: AccessPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Returns the access policy in force.
    #[must_use]
    pub const fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Posts a new pending task owned by the caller's charity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::PermissionDenied`] when the caller has no
    /// charity, [`TaskLifecycleError::Validation`] when the attributes are
    /// invalid, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        self.authorize(actor, TaskOperation::CreateTask, None)?;
        let charity_id = actor
            .charity_id()
            .ok_or(TaskLifecycleError::PermissionDenied(TaskOperation::CreateTask))?;

        if let Some(claimed) = request.charity_id.filter(|claimed| *claimed != charity_id) {
            debug!(%claimed, %charity_id, "ignoring client supplied charity");
        }

        let details = request.into_details()?;
        let task = Task::new(charity_id, details, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), %charity_id, "task created");
        Ok(task)
    }

    /// Lists the tasks the caller may see that survive `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self, actor: &Actor, query: &TaskQuery) -> TaskLifecycleResult<Vec<Task>> {
        self.authorize(actor, TaskOperation::ListTasks, None)?;
        let visibility = TaskVisibility::for_actor(actor);
        Ok(self.repository.list(&visibility, query).await?)
    }

    /// Retrieves a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Records the caller's request for a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::PermissionDenied`] when the caller is not
    /// a benefactor, [`TaskLifecycleError::NotFound`] when the task is missing,
    /// or [`TaskLifecycleError::InvalidState`] when it is not pending.
    pub async fn request(&self, task_id: TaskId, actor: &Actor) -> TaskLifecycleResult<Task> {
        self.authorize(actor, TaskOperation::RequestTask, None)?;
        let benefactor = actor
            .benefactor_id()
            .ok_or(TaskLifecycleError::PermissionDenied(TaskOperation::RequestTask))?;
        let task = self.find(task_id).await?;
        self.transition(task, |pending, clock| pending.request(benefactor, clock))
            .await
    }

    /// Applies the owning charity's answer to a waiting request.
    ///
    /// `response` must be exactly `"A"` (accept) or `"R"` (reject).
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::PermissionDenied`] when the caller has no
    /// charity or does not own the task, [`TaskLifecycleError::InvalidArgument`]
    /// for an unknown response, [`TaskLifecycleError::NotFound`] when the task
    /// is missing, or [`TaskLifecycleError::InvalidState`] when it is not
    /// waiting.
    pub async fn respond(
        &self,
        task_id: TaskId,
        actor: &Actor,
        response: &str,
    ) -> TaskLifecycleResult<Task> {
        self.authorize(actor, TaskOperation::RespondTask, None)?;
        let decision = ResponseDecision::try_from(response)?;
        let task = self.find(task_id).await?;
        self.authorize(actor, TaskOperation::RespondTask, Some(&task))?;
        self.transition(task, |waiting, clock| waiting.respond(decision, clock))
            .await
    }

    /// Marks an assigned task as done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing,
    /// [`TaskLifecycleError::PermissionDenied`] when the completion policy
    /// excludes the caller, or [`TaskLifecycleError::InvalidState`] when the
    /// task is not assigned.
    pub async fn complete(&self, task_id: TaskId, actor: &Actor) -> TaskLifecycleResult<Task> {
        let task = self.find(task_id).await?;
        self.authorize(actor, TaskOperation::CompleteTask, Some(&task))?;
        self.transition(task, |assigned, clock| assigned.complete(clock))
            .await
    }

    /// Runs the role check for `operation` without loading any task.
    ///
    /// Lets callers reject an actor before doing work of their own, such as
    /// decoding a request body.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::PermissionDenied`] when the actor lacks
    /// the role `operation` requires.
    pub fn ensure_allowed(
        &self,
        actor: &Actor,
        operation: TaskOperation,
    ) -> TaskLifecycleResult<()> {
        self.authorize(actor, operation, None)
    }

    fn authorize(
        &self,
        actor: &Actor,
        operation: TaskOperation,
        task: Option<&Task>,
    ) -> TaskLifecycleResult<()> {
        if self.policy.authorize(actor, operation, task) {
            return Ok(());
        }
        debug!(user_id = %actor.user_id(), %operation, "operation denied");
        Err(TaskLifecycleError::PermissionDenied(operation))
    }

    /// Applies `apply` to `task` and persists it against the revision it
    /// was loaded at.
    async fn transition<F>(&self, mut task: Task, apply: F) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError>,
    {
        let loaded = task.revision();
        apply(&mut task, &*self.clock)?;
        match self.repository.update_if_current(&task, loaded).await {
            Ok(()) => {
                info!(
                    task_id = %task.id(),
                    from = loaded.state().as_str(),
                    to = task.state().as_str(),
                    "task transitioned"
                );
                Ok(task)
            }
            Err(TaskRepositoryError::StateConflict { task_id, expected }) => {
                warn!(%task_id, expected = expected.as_str(), "lost transition race");
                Err(TaskLifecycleError::InvalidState {
                    task_id,
                    required: expected,
                })
            }
            Err(TaskRepositoryError::NotFound(task_id)) => {
                Err(TaskLifecycleError::NotFound(task_id))
            }
            Err(err) => Err(err.into()),
        }
    }
}
