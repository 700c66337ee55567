use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::models::{
    event::{Event, EventStatus},
    rating::Rating,
    registration::Registration,
    session::EventSession,
};
use crate::domain::services::rating::RatingSummary;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// List view of an event.
#[derive(Serialize)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date_start: String,
    pub date_end: Option<String>,
    pub time: String,
    pub location: String,
    pub address: String,
    pub capacity: i32,
    pub remaining_capacity: i32,
    pub photo: String,
    pub price: String,
    pub category: String,
    pub status: EventStatus,
    pub mode: String,
    pub average_rating: f64,
    pub unique_raters: i64,
}

impl EventSummary {
    pub fn new(event: &Event, category: String, status: EventStatus, ratings: &RatingSummary) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            date_start: event.date_start.clone(),
            date_end: event.date_end.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            address: event.address.clone(),
            capacity: event.capacity,
            remaining_capacity: event.remaining_capacity,
            photo: event.photo.clone(),
            price: event.price.clone(),
            category,
            status,
            mode: event.mode.clone(),
            average_rating: ratings.average_rating,
            unique_raters: ratings.unique_raters,
        }
    }
}

/// Detail view; the meeting link is only exposed for online events.
#[derive(Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub summary: EventSummary,
    pub category_id: String,
    pub location_id: Option<String>,
    pub benefits: String,
    pub link: Option<String>,
    pub popularity_score: f64,
    pub sessions: Vec<EventSession>,
}

impl EventDetail {
    pub fn new(event: &Event, category: String, status: EventStatus, ratings: &RatingSummary, sessions: Vec<EventSession>) -> Self {
        Self {
            summary: EventSummary::new(event, category, status, ratings),
            category_id: event.category_id.clone(),
            location_id: event.location_id.clone(),
            benefits: event.benefits.clone(),
            link: event.is_online().then(|| event.link.clone()),
            popularity_score: event.popularity_score,
            sessions,
        }
    }
}

#[derive(Serialize)]
pub struct PopularEvent {
    pub id: String,
    pub name: String,
    pub date_start: String,
    pub location: String,
    pub photo: String,
    pub price: String,
    pub category: String,
    pub status: EventStatus,
    pub popularity_score: f64,
    pub average_rating: f64,
    pub unique_raters: i64,
}

impl PopularEvent {
    pub fn new(event: &Event, category: String, status: EventStatus, ratings: &RatingSummary) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            date_start: event.date_start.clone(),
            location: event.location.clone(),
            photo: event.photo.clone(),
            price: event.price.clone(),
            category,
            status,
            popularity_score: event.popularity_score,
            average_rating: ratings.average_rating,
            unique_raters: ratings.unique_raters,
        }
    }
}

/// An event the caller signed up for, with the signup's payment state.
#[derive(Serialize)]
pub struct RegisteredEvent {
    pub registration_id: String,
    pub payment_status: String,
    pub registered_at: DateTime<Utc>,
    pub event: EventSummary,
}

impl RegisteredEvent {
    pub fn new(registration: &Registration, event: EventSummary) -> Self {
        Self {
            registration_id: registration.id.clone(),
            payment_status: registration.payment_status.clone(),
            registered_at: registration.created_at,
            event,
        }
    }
}

#[derive(Serialize)]
pub struct RegistrantView {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job: String,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub registered_at: DateTime<Utc>,
}

impl From<Registration> for RegistrantView {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            name: r.name,
            email: r.email,
            phone: r.phone,
            job: r.job,
            payment_method: r.payment_method,
            payment_status: r.payment_status,
            registered_at: r.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct RegistrantsResponse {
    pub event_id: String,
    pub event_name: String,
    pub total: usize,
    pub registrants: Vec<RegistrantView>,
}

#[derive(Serialize)]
pub struct RegistrationCreated {
    pub message: String,
    pub registration: RegistrantView,
}

#[derive(Serialize)]
pub struct RegistrationCheck {
    #[serde(rename = "isRegistered")]
    pub is_registered: bool,
}

#[derive(Serialize)]
pub struct EventRatingsResponse {
    pub event_id: String,
    #[serde(flatten)]
    pub summary: RatingSummary,
    pub ratings: Vec<Rating>,
}
