use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Rating {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(user_id: String, event_id: String, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            rating,
            created_at: Utc::now(),
        }
    }
}
