use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventSession {
    pub id: String,
    pub event_id: String,
    pub date: String,
    pub time: String,
    pub speaker: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl EventSession {
    pub fn new(event_id: String, date: String, time: String, speaker: String, location: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            date,
            time,
            speaker,
            location,
            created_at: Utc::now(),
        }
    }
}
