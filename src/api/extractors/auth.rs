use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::user::User;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{debug, Span};

pub struct AuthUser(pub User);

pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts.headers.get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verifies the token and loads its subject. A token for a deleted user is rejected.
pub(crate) async fn resolve_user(state: &AppState, token: &str) -> Result<User, AppError> {
    let claims = state.auth_service.verify_token(token)?;

    let user = state.user_repo.find_by_id(&claims.sub).await?
        .ok_or_else(|| {
            debug!("Token subject {} no longer exists", claims.sub);
            AppError::Unauthorized
        })?;

    Span::current().record("user_id", user.id.as_str());
    Ok(user)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let user = resolve_user(&app_state, token).await?;
        Ok(AuthUser(user))
    }
}
