//! User and role profile registration handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::http::{
    ApiError, AppState, CurrentUser,
    responses::{
        BenefactorResponse, CharityResponse, RegisterBenefactorBody, RegisterCharityBody,
        RegisterUserBody, RegisteredUserResponse,
    },
};
use crate::identity::services::{RegisterBenefactorRequest, RegisterCharityRequest};

/// Registers a user and returns their token.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterUserBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), ApiError> {
    let Json(body) = payload?;
    let (user, token) = state.identity.register_user(body.username).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUserResponse::new(&user, token.expose())),
    ))
}

/// Creates the caller's benefactor profile.
pub async fn register_benefactor(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<RegisterBenefactorBody>, JsonRejection>,
) -> Result<(StatusCode, Json<BenefactorResponse>), ApiError> {
    let Json(body) = payload?;
    let request = RegisterBenefactorRequest::new()
        .with_experience(body.experience)
        .with_free_time_per_week(body.free_time_per_week);
    let benefactor = state.identity.register_benefactor(&user, request).await?;
    Ok((StatusCode::CREATED, Json(BenefactorResponse::from(&benefactor))))
}

/// Creates the caller's charity profile.
pub async fn register_charity(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<RegisterCharityBody>, JsonRejection>,
) -> Result<(StatusCode, Json<CharityResponse>), ApiError> {
    let Json(body) = payload?;
    let request = RegisterCharityRequest::new(body.name, body.reg_number);
    let charity = state.identity.register_charity(&user, request).await?;
    Ok((StatusCode::CREATED, Json(CharityResponse::from(&charity))))
}
