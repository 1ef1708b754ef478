//! Task listing, creation, and lifecycle handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::http::{
    ApiError, AppState, CurrentActor,
    responses::{CreateTaskBody, DetailResponse, RespondTaskBody, TaskResponse},
};
use crate::task::{
    domain::{TaskId, TaskQuery},
    services::{CreateTaskRequest, TaskOperation},
};
use uuid::Uuid;

/// Lists the tasks visible to the caller.
///
/// Query parameters narrow the listing; see [`TaskQuery::from_params`].
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    CurrentActor { actor, .. }: CurrentActor,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let query = TaskQuery::from_params(
        params
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );
    let tasks = state.tasks.list(&actor, &query).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// Posts a task for the caller's charity.
///
/// Callers without a charity are refused before the body is inspected.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    CurrentActor { actor, .. }: CurrentActor,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    state
        .tasks
        .ensure_allowed(&actor, TaskOperation::CreateTask)?;
    let Json(body) = payload?;
    let mut request = CreateTaskRequest::new(body.title)
        .with_age_limits(body.age_limit_from, body.age_limit_to);
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(date) = body.date {
        request = request.with_date(date);
    }
    if let Some(gender_limit) = body.gender_limit {
        request = request.with_gender_limit(gender_limit);
    }
    if let Some(charity_id) = body.charity_id {
        request = request.with_charity_id(charity_id);
    }
    let task = state.tasks.create(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// Requests a pending task for the calling benefactor.
pub async fn request_task(
    State(state): State<Arc<AppState>>,
    CurrentActor { actor, .. }: CurrentActor,
    Path(task_id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    state.tasks.request(parse_task_id(&task_id), &actor).await?;
    Ok(Json(DetailResponse::new("Request sent.")))
}

/// Accepts or rejects the waiting request on a task.
///
/// A missing or malformed body is treated as an empty answer.
pub async fn respond_task(
    State(state): State<Arc<AppState>>,
    CurrentActor { actor, .. }: CurrentActor,
    Path(raw_id): Path<String>,
    payload: Result<Json<RespondTaskBody>, JsonRejection>,
) -> Result<Json<DetailResponse>, ApiError> {
    let response = payload
        .ok()
        .and_then(|Json(body)| body.response)
        .unwrap_or_default();
    let task_id = parse_task_id(&raw_id);
    state.tasks.respond(task_id, &actor, &response).await?;
    Ok(Json(DetailResponse::new("Response sent.")))
}

/// Marks an assigned task as done.
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    CurrentActor { actor, .. }: CurrentActor,
    Path(task_id): Path<String>,
) -> Result<Json<DetailResponse>, ApiError> {
    state.tasks.complete(parse_task_id(&task_id), &actor).await?;
    Ok(Json(DetailResponse::new(
        "Task has been done successfully.",
    )))
}

/// Malformed ids resolve to the nil id, which never names a task, so the
/// service reports them as not found after its role checks.
fn parse_task_id(raw: &str) -> TaskId {
    raw.parse()
        .unwrap_or_else(|_| TaskId::from_uuid(Uuid::nil()))
}
