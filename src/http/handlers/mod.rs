//! HTTP request handlers.

mod health;
mod registration;
mod tasks;

pub use health::health_check;
pub use registration::{register_benefactor, register_charity, register_user};
pub use tasks::{complete_task, create_task, list_tasks, request_task, respond_task};
