//! Task aggregate root and its lifecycle state machine.

use super::{ParseTaskStateError, TaskDetails, TaskDomainError, TaskId};
use crate::identity::domain::{BenefactorId, CharityId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Open for requests, no benefactor attached.
    #[serde(rename = "P")]
    Pending,
    /// A benefactor has asked for the task; the charity has not answered.
    #[serde(rename = "W")]
    Waiting,
    /// The charity accepted the benefactor; work is in progress.
    #[serde(rename = "A")]
    Assigned,
    /// The task has been completed.
    #[serde(rename = "D")]
    Done,
}

impl TaskState {
    /// Returns the canonical storage and wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "P",
            Self::Waiting => "W",
            Self::Assigned => "A",
            Self::Done => "D",
        }
    }

    /// Returns whether tasks in this state carry an assigned benefactor.
    #[must_use]
    pub const fn holds_assignment(self) -> bool {
        matches!(self, Self::Waiting | Self::Assigned)
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "p" | "pending" => Ok(Self::Pending),
            "w" | "waiting" => Ok(Self::Waiting),
            "a" | "assigned" => Ok(Self::Assigned),
            "d" | "done" => Ok(Self::Done),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

/// Charity answer to a pending benefactor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseDecision {
    /// Accept the requesting benefactor.
    Accept,
    /// Turn the requesting benefactor down and reopen the task.
    Reject,
}

impl ResponseDecision {
    /// Returns the wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "A",
            Self::Reject => "R",
        }
    }
}

impl TryFrom<&str> for ResponseDecision {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "A" => Ok(Self::Accept),
            "R" => Ok(Self::Reject),
            _ => Err(TaskDomainError::InvalidDecision(value.to_owned())),
        }
    }
}

/// Snapshot of a task's position in its lifecycle.
///
/// The version increases on every transition, so two snapshots with the
/// same state still differ once the task has left and re-entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskRevision {
    state: TaskState,
    version: u64,
}

impl TaskRevision {
    /// Creates a revision from its parts.
    #[must_use]
    pub const fn new(state: TaskState, version: u64) -> Self {
        Self { state, version }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(self) -> TaskState {
        self.state
    }

    /// Returns the transition counter.
    #[must_use]
    pub const fn version(self) -> u64 {
        self.version
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    charity_id: CharityId,
    assigned_benefactor: Option<BenefactorId>,
    completed_by: Option<BenefactorId>,
    state: TaskState,
    version: u64,
    details: TaskDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning charity.
    pub charity_id: CharityId,
    /// Benefactor attached while waiting or assigned.
    pub assigned_benefactor: Option<BenefactorId>,
    /// Benefactor that held the task when it was completed.
    pub completed_by: Option<BenefactorId>,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Number of transitions applied so far.
    pub version: u64,
    /// Persisted descriptive attributes.
    pub details: TaskDetails,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task owned by `charity_id`.
    #[must_use]
    pub fn new(charity_id: CharityId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            charity_id,
            assigned_benefactor: None,
            completed_by: None,
            state: TaskState::Pending,
            version: 0,
            details,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            charity_id: data.charity_id,
            assigned_benefactor: data.assigned_benefactor,
            completed_by: data.completed_by,
            state: data.state,
            version: data.version,
            details: data.details,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning charity.
    #[must_use]
    pub const fn charity_id(&self) -> CharityId {
        self.charity_id
    }

    /// Returns the benefactor attached while waiting or assigned.
    #[must_use]
    pub const fn assigned_benefactor(&self) -> Option<BenefactorId> {
        self.assigned_benefactor
    }

    /// Returns the benefactor that completed the task, once done.
    #[must_use]
    pub const fn completed_by(&self) -> Option<BenefactorId> {
        self.completed_by
    }

    /// Returns the task lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the number of transitions applied so far.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the current state and version.
    #[must_use]
    pub const fn revision(&self) -> TaskRevision {
        TaskRevision::new(self.state, self.version)
    }

    /// Returns the descriptive attributes.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records a benefactor's request, moving `Pending → Waiting`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is pending.
    pub fn request(
        &mut self,
        benefactor: BenefactorId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.require_state(TaskState::Pending)?;
        self.assigned_benefactor = Some(benefactor);
        self.state = TaskState::Waiting;
        self.touch(clock);
        Ok(())
    }

    /// Applies the charity's answer to a waiting request.
    ///
    /// Accepting moves `Waiting → Assigned` and keeps the benefactor.
    /// Rejecting moves `Waiting → Pending` and detaches the benefactor.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is waiting.
    pub fn respond(
        &mut self,
        decision: ResponseDecision,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.require_state(TaskState::Waiting)?;
        match decision {
            ResponseDecision::Accept => self.state = TaskState::Assigned,
            ResponseDecision::Reject => {
                self.assigned_benefactor = None;
                self.state = TaskState::Pending;
            }
        }
        self.touch(clock);
        Ok(())
    }

    /// Marks an assigned task as done.
    ///
    /// The assigned benefactor moves to [`Task::completed_by`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is assigned.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.require_state(TaskState::Assigned)?;
        self.completed_by = self.assigned_benefactor.take();
        self.state = TaskState::Done;
        self.touch(clock);
        Ok(())
    }

    fn require_state(&self, required: TaskState) -> Result<(), TaskDomainError> {
        if self.state != required {
            return Err(TaskDomainError::InvalidState {
                task_id: self.id,
                required,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Bumps the version and stamps `updated_at` with the clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.version = self.version.saturating_add(1);
        self.updated_at = clock.utc();
    }
}
