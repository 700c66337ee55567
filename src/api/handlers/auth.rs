use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, RegisterUserRequest};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{auth::{AuthResponse, UserProfile}, user::User};
use std::sync::Arc;
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!("Password must be at least {} characters", MIN_PASSWORD_LEN)));
    }
    Ok(())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_credentials(&payload.username, &payload.password)?;
    let username = payload.username.trim().to_string();

    if state.user_repo.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password_hash = state.auth_service.hash_password(&payload.password)?;
    let user = state.user_repo.create(&User::new(username, password_hash)).await?;
    let token = state.auth_service.issue_token(&user)?;

    info!("User registered: {}", user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_username(payload.username.trim()).await?
        .ok_or(AppError::Unauthorized)?;

    state.auth_service.verify_password(&payload.password, &user.password_hash)?;
    let token = state.auth_service.issue_token(&user)?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

pub async fn profile(AuthUser(user): AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserProfile::from(&user)))
}
