//! Application services for task lifecycle orchestration.

mod access;
mod lifecycle;

pub use access::{AccessPolicy, CompletionPolicy, TaskOperation};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
