//! Explicit capability checks evaluated before every task operation.

use crate::identity::domain::Actor;
use crate::task::domain::Task;
use std::fmt;

/// Who may mark an assigned task as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum CompletionPolicy {
    /// Any authenticated caller.
    #[default]
    Any,
    /// Only the owner of the task's charity.
    Owner,
    /// The owner of the task's charity or the assigned benefactor.
    Participant,
}

impl CompletionPolicy {
    /// Returns the configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Owner => "owner",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for CompletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations guarded by [`AccessPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// List visible tasks.
    ListTasks,
    /// Post a new task.
    CreateTask,
    /// Ask to take a pending task.
    RequestTask,
    /// Accept or reject a waiting request.
    RespondTask,
    /// Mark an assigned task as done.
    CompleteTask,
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListTasks => "list tasks",
            Self::CreateTask => "create task",
            Self::RequestTask => "request task",
            Self::RespondTask => "respond to task request",
            Self::CompleteTask => "complete task",
        };
        f.write_str(name)
    }
}

/// Role and ownership rules for task operations.
///
/// [`AccessPolicy::authorize`] is called twice per transition: once without
/// a resource to check the caller's role, and once with the loaded task to
/// check ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    completion: CompletionPolicy,
}

impl AccessPolicy {
    /// Creates a policy with the given completion rule.
    #[must_use]
    pub const fn new(completion: CompletionPolicy) -> Self {
        Self { completion }
    }

    /// Returns the completion rule.
    #[must_use]
    pub const fn completion(&self) -> CompletionPolicy {
        self.completion
    }

    /// Returns whether `actor` may perform `operation` on `task`.
    ///
    /// With `task` set to `None` only the role requirement is checked.
    #[must_use]
    pub fn authorize(&self, actor: &Actor, operation: TaskOperation, task: Option<&Task>) -> bool {
        match operation {
            TaskOperation::ListTasks => true,
            TaskOperation::CreateTask => actor.charity_id().is_some(),
            TaskOperation::RequestTask => actor.benefactor_id().is_some(),
            TaskOperation::RespondTask => {
                task.map_or(actor.charity_id().is_some(), |loaded| owns(actor, loaded))
            }
            TaskOperation::CompleteTask => self.authorize_completion(actor, task),
        }
    }

    fn authorize_completion(&self, actor: &Actor, task: Option<&Task>) -> bool {
        match (self.completion, task) {
            (CompletionPolicy::Any, _) => true,
            (CompletionPolicy::Owner, None) => actor.charity_id().is_some(),
            (CompletionPolicy::Owner, Some(task)) => owns(actor, task),
            (CompletionPolicy::Participant, None) => {
                actor.charity_id().is_some() || actor.benefactor_id().is_some()
            }
            (CompletionPolicy::Participant, Some(task)) => {
                owns(actor, task)
                    || actor
                        .benefactor_id()
                        .is_some_and(|id| task.assigned_benefactor() == Some(id))
            }
        }
    }
}

fn owns(actor: &Actor, task: &Task) -> bool {
    actor.charity_id() == Some(task.charity_id())
}
