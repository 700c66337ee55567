use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateRatingRequest, UpdateRatingRequest},
    responses::{EventRatingsResponse, MessageResponse},
};
use crate::domain::models::{rating::Rating, user::User};
use crate::domain::services::rating::{validate_score, RatingSummary};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

async fn owned_rating(state: &AppState, user: &User, id: &str) -> Result<Rating, AppError> {
    let rating = state.rating_repo.find_by_id(id).await?
        .ok_or_else(|| AppError::NotFound("Rating not found".into()))?;

    if rating.user_id != user.id {
        warn!("User {} tried to change rating {} owned by {}", user.id, rating.id, rating.user_id);
        return Err(AppError::Unauthorized);
    }
    Ok(rating)
}

pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateRatingRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_score(payload.rating)?;

    if state.event_repo.find_by_id(&payload.event_id).await?.is_none() {
        return Err(AppError::NotFound("Event not found".into()));
    }

    if state.rating_repo.find_by_user_and_event(&user.id, &payload.event_id).await?.is_some() {
        return Err(AppError::Conflict("You have already rated this event".into()));
    }

    let created = state.rating_repo.create(&Rating::new(user.id.clone(), payload.event_id, payload.rating)).await?;
    info!("User {} rated event {} with {}", user.id, created.event_id, created.rating);

    state.popularity.refresh(&created.event_id).await;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_rating(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRatingRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_score(payload.rating)?;

    let mut rating = owned_rating(&state, &user, &id).await?;
    rating.rating = payload.rating;

    let updated = state.rating_repo.update(&rating).await?;
    state.popularity.refresh(&updated.event_id).await;

    Ok(Json(updated))
}

pub async fn delete_rating(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rating = owned_rating(&state, &user, &id).await?;

    state.rating_repo.delete(&rating.id).await?;
    state.popularity.refresh(&rating.event_id).await;

    info!("Rating {} deleted by {}", rating.id, user.id);
    Ok(Json(MessageResponse::new("Rating deleted successfully")))
}

pub async fn list_event_ratings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.event_repo.find_by_id(&id).await?.is_none() {
        return Err(AppError::NotFound("Event not found".into()));
    }

    let ratings = state.rating_repo.list_by_event(&id).await?;
    let summary = RatingSummary::from_ratings(&ratings);

    Ok(Json(EventRatingsResponse { event_id: id, summary, ratings }))
}
