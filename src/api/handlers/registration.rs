use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{admin::AdminUser, auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::dtos::{
    requests::RegisterEventRequest,
    responses::{RegisteredEvent, RegistrantView, RegistrantsResponse, RegistrationCheck, RegistrationCreated},
};
use crate::api::handlers::event::{category_names, summarize};
use crate::domain::services::{registration_service::RegistrationInput, status::status_of};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

/// At most this many suggestions are returned by `unregistered_events`.
pub const SUGGESTION_LIMIT: usize = 6;

/// The caller is resolved leniently so that a missing or full event is
/// reported before the missing login.
pub async fn register_for_event(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(id): Path<String>,
    Json(payload): Json<RegisterEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = RegistrationInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        job: payload.job,
        payment_method: payload.payment_method,
    };

    let registration = state.registration_service.register(user.as_ref(), &id, input).await?;
    info!("Registration {} created for event {}", registration.id, id);

    Ok((StatusCode::CREATED, Json(RegistrationCreated {
        message: "Registration successful".to_string(),
        registration: RegistrantView::from(registration),
    })))
}

pub async fn list_registrants(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&id).await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    let registrants: Vec<RegistrantView> = state.registration_repo.list_by_event(&event.id).await?
        .into_iter()
        .map(RegistrantView::from)
        .collect();

    Ok(Json(RegistrantsResponse {
        event_id: event.id,
        event_name: event.name,
        total: registrants.len(),
        registrants,
    }))
}

pub async fn registered_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.registration_repo.list_by_user(&user.id).await?;
    let categories = category_names(&state).await?;

    let mut views = Vec::with_capacity(registrations.len());
    for registration in &registrations {
        let Some(event) = state.event_repo.find_by_id(&registration.event_id).await? else {
            warn!("Registration {} points at missing event {}", registration.id, registration.event_id);
            continue;
        };
        let summary = summarize(&state, &event, &categories).await?;
        views.push(RegisteredEvent::new(registration, summary));
    }

    Ok(Json(views))
}

pub async fn check_registration(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.event_repo.find_by_id(&id).await?.is_none() {
        return Err(AppError::NotFound("Event not found".into()));
    }

    let is_registered = state.registration_repo.find_by_user_and_event(&user.id, &id).await?.is_some();
    Ok(Json(RegistrationCheck { is_registered }))
}

/// Upcoming or ongoing events the caller has not signed up for yet.
pub async fn unregistered_events(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let candidates = state.event_repo.list_not_registered_by(&user.id).await?;
    let categories = category_names(&state).await?;

    let mut suggestions = Vec::new();
    for event in candidates.iter().filter(|e| status_of(e, now).is_open()).take(SUGGESTION_LIMIT) {
        suggestions.push(summarize(&state, event, &categories).await?);
    }

    Ok(Json(suggestions))
}
