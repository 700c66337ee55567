use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::api::extractors::auth::{bearer_token, resolve_user};
use crate::domain::models::user::User;
use crate::error::AppError;
use std::sync::Arc;
use tracing::debug;

/// Resolves the caller when a valid bearer token is present, otherwise `None`.
pub struct MaybeAuthUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };

        match resolve_user(&app_state, token).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(AppError::Unauthorized) => {
                debug!("MaybeAuth: invalid token, treating as guest");
                Ok(MaybeAuthUser(None))
            }
            Err(e) => Err(e),
        }
    }
}
