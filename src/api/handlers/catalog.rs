use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::admin::AdminUser;
use crate::api::dtos::{
    requests::{CategoryRequest, LocationRequest},
    responses::MessageResponse,
};
use crate::domain::models::catalog::{Category, Location};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = Category::new(required(&payload.name, "Category name")?);
    let created = state.category_repo.create(&category).await?;

    info!("Category created: {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.category_repo.list().await?))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let category = state.category_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;
    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = Category { id, name: required(&payload.name, "Category name")? };
    Ok(Json(state.category_repo.update(&category).await?))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.category_repo.delete(&id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

pub async fn create_location(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<LocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = Location::new(required(&payload.city, "City")?);
    let created = state.location_repo.create(&location).await?;

    info!("Location created: {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.location_repo.list().await?))
}

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("Location not found".into()))?;
    Ok(Json(location))
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<LocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let location = Location { id, city: required(&payload.city, "City")? };
    Ok(Json(state.location_repo.update(&location).await?))
}

pub async fn delete_location(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.location_repo.delete(&id).await?;
    Ok(Json(MessageResponse::new("Location deleted successfully")))
}
