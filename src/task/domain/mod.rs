//! Domain model for the task lifecycle.
//!
//! A task moves `Pending → Waiting → Assigned → Done`, with a rejection path
//! from `Waiting` back to `Pending`. Every transition lives on [`Task`] and
//! leaves the aggregate untouched when its precondition fails.

mod details;
mod error;
mod ids;
mod query;
mod task;

pub use details::{AgeLimits, GenderLimit, TaskDetails, TaskTitle};
pub use error::{ParseTaskStateError, TaskDomainError};
pub use ids::TaskId;
pub use query::{TaskPredicate, TaskQuery, TaskVisibility};
pub use task::{PersistedTaskData, ResponseDecision, Task, TaskRevision, TaskState};
