//! Token authentication extractors.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use super::{ApiError, AppState};
use crate::identity::domain::{Actor, AuthToken, User};

/// Authenticated user, without role lookup.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticated user together with their role profiles.
#[derive(Debug, Clone)]
pub struct CurrentActor {
    /// Authenticated user.
    pub user: User,
    /// Role profiles held by the user.
    pub actor: Actor,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = presented_token(&parts.headers).ok_or_else(ApiError::unauthenticated)?;
        let user = state.identity.authenticate(&token).await?;
        Ok(Self(user))
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        let actor = state.identity.resolve_actor(&user).await?;
        Ok(Self { user, actor })
    }
}

/// Reads `Authorization: Token <token>` or `Authorization: Bearer <token>`.
fn presented_token(headers: &HeaderMap) -> Option<AuthToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, rest) = value.trim().split_once(' ')?;
    let known_scheme =
        scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    let token = rest.trim();
    (known_scheme && !token.is_empty()).then(|| AuthToken::from_presented(token))
}
