//! Error types for task domain validation and transitions.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {0} characters long, at most 60 are allowed")]
    TitleTooLong(usize),

    /// The lower age limit exceeds the upper one.
    #[error("age limit range {from}..={to} is empty")]
    InvalidAgeRange {
        /// Lower age bound.
        from: u16,
        /// Upper age bound.
        to: u16,
    },

    /// The gender limit code is unknown.
    #[error("invalid gender limit '{0}', expected M, F or MF")]
    InvalidGenderLimit(String),

    /// The charity response is neither accept nor reject.
    #[error("invalid response '{0}', expected A or R")]
    InvalidDecision(String),

    /// The task is not in the state the action requires.
    #[error("task {task_id} is {actual:?}, action requires {required:?}")]
    InvalidState {
        /// Task identifier.
        task_id: TaskId,
        /// State the action requires.
        required: TaskState,
        /// State the task is in.
        actual: TaskState,
    },
}

/// Error returned while parsing task states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);
