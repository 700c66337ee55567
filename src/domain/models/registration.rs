use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::event::Event;

pub const PAYMENT_FREE: &str = "free";
pub const PAYMENT_PAID: &str = "paid";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job: String,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewRegistrationParams {
    pub user_id: String,
    pub event_id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job: String,
    pub payment_method: Option<String>,
}

impl Registration {
    pub fn new(params: NewRegistrationParams) -> Self {
        let payment_status = if params.payment_method.is_some() { PAYMENT_PAID } else { PAYMENT_FREE };

        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            event_id: params.event_id,
            username: params.username,
            name: params.name,
            email: params.email,
            phone: params.phone,
            job: params.job,
            payment_method: params.payment_method,
            payment_status: payment_status.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Everything a notifier needs to tell a registrant about their signup.
#[derive(Debug, Serialize, Clone)]
pub struct RegistrationNotice {
    pub recipient: String,
    pub name: String,
    pub phone: String,
    pub job: String,
    pub event_name: String,
    pub event_description: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub address: String,
    pub mode: String,
    pub link: String,
    pub is_online: bool,
    pub payment_method: Option<String>,
}

impl RegistrationNotice {
    pub fn new(event: &Event, registration: &Registration) -> Self {
        Self {
            recipient: registration.email.clone(),
            name: registration.name.clone(),
            phone: registration.phone.clone(),
            job: registration.job.clone(),
            event_name: event.name.clone(),
            event_description: event.description.clone(),
            event_date: event.date_start.clone(),
            event_time: event.time.clone(),
            location: event.location.clone(),
            address: event.address.clone(),
            mode: event.mode.clone(),
            link: event.link.clone(),
            is_online: event.is_online(),
            payment_method: registration.payment_method.clone(),
        }
    }
}
