use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::admin::AdminUser;
use crate::api::dtos::{
    requests::{CreateEventRequest, SessionRequest, UpdateEventRequest},
    responses::{EventDetail, EventSummary, MessageResponse, PopularEvent},
};
use crate::domain::models::{
    catalog::Location,
    event::{Event, FREE_PRICE},
    session::EventSession,
};
use crate::domain::services::{
    capacity::{self, Capacity},
    placement,
    rating::RatingSummary,
    status::{parse_date, status_of, validate_schedule},
};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub(crate) async fn category_names(state: &AppState) -> Result<HashMap<String, String>, AppError> {
    let categories = state.category_repo.list().await?;
    Ok(categories.into_iter().map(|c| (c.id, c.name)).collect())
}

pub(crate) async fn rating_summary(state: &AppState, event_id: &str) -> Result<RatingSummary, AppError> {
    let ratings = state.rating_repo.list_by_event(event_id).await?;
    Ok(RatingSummary::from_ratings(&ratings))
}

pub(crate) async fn summarize(state: &AppState, event: &Event, categories: &HashMap<String, String>) -> Result<EventSummary, AppError> {
    let ratings = rating_summary(state, &event.id).await?;
    let category = categories.get(&event.category_id).cloned().unwrap_or_default();
    Ok(EventSummary::new(event, category, status_of(event, Utc::now()), &ratings))
}

async fn detail(state: &AppState, event: &Event) -> Result<EventDetail, AppError> {
    let category = state.category_repo.find_by_id(&event.category_id).await?
        .map(|c| c.name)
        .unwrap_or_default();
    let ratings = rating_summary(state, &event.id).await?;
    let sessions = state.session_repo.list_by_event(&event.id).await?;

    Ok(EventDetail::new(event, category, status_of(event, Utc::now()), &ratings, sessions))
}

fn normalize_price(raw: Option<String>) -> String {
    raw.map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| FREE_PRICE.to_string())
}

fn normalize_date_end(raw: Option<String>) -> Option<String> {
    raw.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

fn build_sessions(event_id: &str, requests: Vec<SessionRequest>) -> Result<Vec<EventSession>, AppError> {
    requests.into_iter().enumerate()
        .map(|(i, s)| {
            let date = s.date.trim().to_string();
            if parse_date(&date).is_none() {
                return Err(AppError::Validation(format!("Invalid date format for session {}", i + 1)));
            }
            Ok(EventSession::new(event_id.to_string(), date, s.time, s.speaker, s.location))
        })
        .collect()
}

async fn ensure_category(state: &AppState, category_id: &str) -> Result<(), AppError> {
    if state.category_repo.find_by_id(category_id).await?.is_none() {
        return Err(AppError::Validation("Invalid category ID".into()));
    }
    Ok(())
}

async fn find_venue(state: &AppState, location_id: Option<&str>) -> Result<Option<Location>, AppError> {
    match location_id {
        None => Ok(None),
        Some(id) => state.location_repo.find_by_id(id).await?
            .map(Some)
            .ok_or_else(|| AppError::Validation("Invalid location ID".into())),
    }
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }

    let date_start = payload.date_start.trim().to_string();
    let date_end = normalize_date_end(payload.date_end);
    validate_schedule(&date_start, date_end.as_deref())?;

    let seats = capacity::initial(payload.capacity)?;
    ensure_category(&state, &payload.category_id).await?;

    let location_id = placement::normalize_location_id(payload.location_id.as_deref());
    let venue = find_venue(&state, location_id.as_deref()).await?;
    let resolved = placement::resolve(venue.as_ref(), &payload.address, payload.mode.as_deref(), &payload.link)?;

    let mut event = Event::new(name, date_start, payload.category_id, seats.total);
    seats.apply_to(&mut event);
    resolved.apply_to(&mut event);
    event.description = payload.description;
    event.date_end = date_end;
    event.time = payload.time;
    event.photo = payload.photo;
    event.price = normalize_price(payload.price);
    event.benefits = payload.benefits;
    event.status = status_of(&event, Utc::now()).as_str().to_string();

    let sessions = build_sessions(&event.id, payload.sessions)?;

    let created = state.event_repo.create(&event, &sessions).await?;

    info!("Event {} created by {} with {} sessions", created.id, admin.id, sessions.len());

    Ok((StatusCode::CREATED, Json(detail(&state, &created).await?)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    let categories = category_names(&state).await?;

    let mut summaries = Vec::with_capacity(events.len());
    for event in &events {
        summaries.push(summarize(&state, event, &categories).await?);
    }

    Ok(Json(summaries))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    Ok(Json(detail(&state, &event).await?))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Event name cannot be empty".into()));
        }
        event.name = name;
    }

    if let Some(date_start) = payload.date_start {
        event.date_start = date_start.trim().to_string();
    }
    if payload.date_end.is_some() {
        event.date_end = normalize_date_end(payload.date_end);
    }
    validate_schedule(&event.date_start, event.date_end.as_deref())?;

    let seats = capacity::plan_update(Capacity::of(&event), payload.capacity, payload.remaining_capacity)?;

    if let Some(category_id) = payload.category_id {
        ensure_category(&state, &category_id).await?;
        event.category_id = category_id;
    }

    // A new venue without an explicit mode falls back to the venue default.
    let location_changed = payload.location_id.is_some();
    let location_id = if location_changed {
        placement::normalize_location_id(payload.location_id.as_deref())
    } else {
        event.location_id.clone()
    };
    let venue = find_venue(&state, location_id.as_deref()).await?;
    let address = payload.address.unwrap_or_else(|| event.address.clone());
    let mode = payload.mode.or_else(|| (!location_changed).then(|| event.mode.clone()));
    let link = payload.link.unwrap_or_else(|| event.link.clone());
    placement::resolve(venue.as_ref(), &address, mode.as_deref(), &link)?
        .apply_to(&mut event);

    if let Some(description) = payload.description {
        event.description = description;
    }
    if let Some(time) = payload.time {
        event.time = time;
    }
    if let Some(photo) = payload.photo {
        event.photo = photo;
    }
    if payload.price.is_some() {
        event.price = normalize_price(payload.price);
    }
    if let Some(benefits) = payload.benefits {
        event.benefits = benefits;
    }

    event.status = status_of(&event, Utc::now()).as_str().to_string();

    let sessions = payload.sessions
        .map(|requests| build_sessions(&event.id, requests))
        .transpose()?;

    let updated = state.event_repo.update(&event, seats, sessions.as_deref()).await?;

    info!("Event {} updated by {}", updated.id, admin.id);

    Ok(Json(detail(&state, &updated).await?))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&id).await?;
    info!("Event {} deleted by {}", id, admin.id);

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

pub async fn popular_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_popularity().await?;
    let categories = category_names(&state).await?;
    let now = Utc::now();

    let mut popular = Vec::with_capacity(events.len());
    for event in &events {
        let ratings = rating_summary(&state, &event.id).await?;
        let category = categories.get(&event.category_id).cloned().unwrap_or_default();
        popular.push(PopularEvent::new(event, category, status_of(event, now), &ratings));
    }

    Ok(Json(popular))
}
