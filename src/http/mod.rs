//! HTTP surface of the charity hub.
//!
//! Provides endpoints for:
//! - User, benefactor, and charity registration
//! - Task listing and creation (`/tasks`)
//! - Task lifecycle actions (`/tasks/{task_id}/request`, `/response`, `/done`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

mod auth;
mod error;
mod handlers;
pub mod responses;
mod state;

pub use auth::{CurrentActor, CurrentUser};
pub use error::ApiError;
pub use state::{AppState, IdentityServiceHandle, TaskServiceHandle};

/// Creates the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(handlers::register_user))
        .route("/benefactors", post(handlers::register_benefactor))
        .route("/charities", post(handlers::register_charity))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/tasks/{task_id}/request", get(handlers::request_task))
        .route("/tasks/{task_id}/response", post(handlers::respond_task))
        .route("/tasks/{task_id}/done", post(handlers::complete_task))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
