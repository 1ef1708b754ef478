//! HTTP request and response types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::domain::{
    Benefactor, BenefactorId, Charity, CharityId, User, UserId,
};
use crate::task::domain::{GenderLimit, Task, TaskId, TaskState};

// ============================================================================
// Common types
// ============================================================================

/// `{"detail": ...}` body used for action results and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Human readable outcome.
    pub detail: String,
}

impl DetailResponse {
    /// Creates a detail body.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Registration types
// ============================================================================

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct RegisterUserBody {
    /// Desired username.
    pub username: String,
}

/// Response body for `POST /users`.
///
/// `token` is only ever returned here.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredUserResponse {
    /// New user identifier.
    pub id: UserId,
    /// Normalised username.
    pub username: String,
    /// Plaintext bearer token.
    pub token: String,
}

impl RegisteredUserResponse {
    /// Builds the response from the stored user and the plaintext token.
    #[must_use]
    pub fn new(user: &User, token: &str) -> Self {
        Self {
            id: user.id(),
            username: user.username().as_str().to_owned(),
            token: token.to_owned(),
        }
    }
}

/// Request body for `POST /benefactors`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterBenefactorBody {
    /// Experience level, 0 to 2.
    #[serde(default)]
    pub experience: i64,
    /// Hours offered per week, 0 to 168.
    #[serde(default)]
    pub free_time_per_week: i64,
}

/// Response body for a benefactor profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct BenefactorResponse {
    /// Benefactor profile identifier.
    pub id: BenefactorId,
    /// Owning user.
    pub user_id: UserId,
    /// Experience level.
    pub experience: i16,
    /// Hours offered per week.
    pub free_time_per_week: u8,
}

impl From<&Benefactor> for BenefactorResponse {
    fn from(benefactor: &Benefactor) -> Self {
        Self {
            id: benefactor.id(),
            user_id: benefactor.user_id(),
            experience: benefactor.experience().level(),
            free_time_per_week: benefactor.free_time_per_week().hours(),
        }
    }
}

/// Request body for `POST /charities`.
#[derive(Debug, Deserialize)]
pub struct RegisterCharityBody {
    /// Charity display name.
    pub name: String,
    /// Ten-digit registration number.
    pub reg_number: String,
}

/// Response body for a charity profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct CharityResponse {
    /// Charity profile identifier.
    pub id: CharityId,
    /// Owning user.
    pub user_id: UserId,
    /// Charity display name.
    pub name: String,
    /// Registration number.
    pub reg_number: String,
}

impl From<&Charity> for CharityResponse {
    fn from(charity: &Charity) -> Self {
        Self {
            id: charity.id(),
            user_id: charity.user_id(),
            name: charity.name().as_str().to_owned(),
            reg_number: charity.reg_number().as_str().to_owned(),
        }
    }
}

// ============================================================================
// Task types
// ============================================================================

/// Request body for `POST /tasks`.
///
/// `charity_id` is accepted but the caller's own charity always wins.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    /// Task title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Date the task takes place.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Lower age bound.
    #[serde(default)]
    pub age_limit_from: Option<u16>,
    /// Upper age bound.
    #[serde(default)]
    pub age_limit_to: Option<u16>,
    /// Gender limit code: `M`, `F` or `MF`.
    #[serde(default)]
    pub gender_limit: Option<String>,
    /// Ignored in favour of the caller's charity.
    #[serde(default)]
    pub charity_id: Option<CharityId>,
}

/// Request body for `POST /tasks/{task_id}/response`.
#[derive(Debug, Default, Deserialize)]
pub struct RespondTaskBody {
    /// `A` to accept or `R` to reject.
    #[serde(default)]
    pub response: Option<String>,
}

/// Response body for a task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Owning charity.
    pub charity_id: CharityId,
    /// Benefactor attached while waiting or assigned.
    pub assigned_benefactor_id: Option<BenefactorId>,
    /// Benefactor that completed the task.
    pub completed_by_id: Option<BenefactorId>,
    /// Lifecycle state code.
    pub state: TaskState,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Date the task takes place.
    pub date: Option<NaiveDate>,
    /// Lower age bound.
    pub age_limit_from: Option<u16>,
    /// Upper age bound.
    pub age_limit_to: Option<u16>,
    /// Gender limit.
    pub gender_limit: Option<GenderLimit>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        let details = task.details();
        Self {
            id: task.id(),
            charity_id: task.charity_id(),
            assigned_benefactor_id: task.assigned_benefactor(),
            completed_by_id: task.completed_by(),
            state: task.state(),
            title: details.title().as_str().to_owned(),
            description: details.description().map(str::to_owned),
            date: details.date(),
            age_limit_from: details.age_limits().lower(),
            age_limit_to: details.age_limits().upper(),
            gender_limit: details.gender_limit(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
