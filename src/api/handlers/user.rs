use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::UpdateUserRequest, responses::MessageResponse};
use crate::api::extractors::{admin::AdminUser, auth::AuthUser};
use crate::api::handlers::auth::validate_credentials;
use crate::domain::models::{auth::UserProfile, user::{User, ROLE_ADMIN, ROLE_USER}};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn ensure_self_or_admin(caller: &User, target_id: &str) -> Result<(), AppError> {
    if caller.id != target_id && !caller.is_admin() {
        return Err(AppError::Forbidden("You can only access your own account".into()));
    }
    Ok(())
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    let profiles: Vec<UserProfile> = users.iter().map(UserProfile::from).collect();
    Ok(Json(profiles))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_admin(&caller, &id)?;

    let user = state.user_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserProfile::from(&user)))
}

/// A password change needs the current password, even for admins.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_self_or_admin(&caller, &id)?;

    let mut user = state.user_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if let Some(username) = payload.username.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        if username != user.username && state.user_repo.find_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".into()));
        }
        user.username = username;
    }

    if let Some(new_password) = payload.new_password.filter(|p| !p.is_empty()) {
        let old_password = payload.old_password.filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation("Current password is required to set a new one".into()))?;

        state.auth_service.verify_password(&old_password, &user.password_hash)?;
        validate_credentials(&user.username, &new_password)?;
        user.password_hash = state.auth_service.hash_password(&new_password)?;
    }

    if let Some(role) = payload.role.filter(|r| !r.is_empty()) {
        if !caller.is_admin() {
            return Err(AppError::Forbidden("Only admins can change roles".into()));
        }
        if role != ROLE_USER && role != ROLE_ADMIN {
            return Err(AppError::Validation("Role must be 'user' or 'admin'".into()));
        }
        user.role = role;
    }

    let updated = state.user_repo.update(&user).await?;
    info!("User updated: {}", updated.id);

    Ok(Json(UserProfile::from(&updated)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if admin.id == id {
        return Err(AppError::Validation("You cannot delete your own account".into()));
    }

    state.user_repo.delete(&id).await?;
    info!("User {} deleted by {}", id, admin.id);

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
