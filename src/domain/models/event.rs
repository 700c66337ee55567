use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const FREE_PRICE: &str = "Free";
pub const ONLINE_LOCATION: &str = "Online";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Ended,
    Unknown,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Ended => "ended",
            EventStatus::Unknown => "unknown",
        }
    }

    /// Upcoming and ongoing events still accept interest from users.
    pub fn is_open(&self) -> bool {
        matches!(self, EventStatus::Upcoming | EventStatus::Ongoing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventMode::Online => "online",
            EventMode::Offline => "offline",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" => Some(EventMode::Online),
            "offline" => Some(EventMode::Offline),
            _ => None,
        }
    }
}

/// A validated seat edit. Storage applies it against the stored row so that
/// seats claimed in the meantime are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityChange {
    pub total: Option<i32>,
    pub remaining: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub description: String,
    pub date_start: String,
    pub date_end: Option<String>,
    pub time: String,
    pub location_id: Option<String>,
    pub location: String,
    pub address: String,
    pub capacity: i32,
    pub remaining_capacity: i32,
    pub photo: String,
    pub price: String,
    pub category_id: String,
    pub benefits: String,
    pub mode: String,
    pub link: String,
    pub status: String,
    pub popularity_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, date_start: String, category_id: String, capacity: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: String::new(),
            date_start,
            date_end: None,
            time: String::new(),
            location_id: None,
            location: ONLINE_LOCATION.to_string(),
            address: String::new(),
            capacity,
            remaining_capacity: capacity,
            photo: String::new(),
            price: FREE_PRICE.to_string(),
            category_id,
            benefits: String::new(),
            mode: EventMode::Online.as_str().to_string(),
            link: String::new(),
            status: EventStatus::Unknown.as_str().to_string(),
            popularity_score: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn is_free(&self) -> bool {
        is_free_price(&self.price)
    }

    pub fn is_online(&self) -> bool {
        self.mode == EventMode::Online.as_str()
    }
}

/// Prices are free text; only the "Free" sentinel (any casing) skips payment.
pub fn is_free_price(price: &str) -> bool {
    price.trim().eq_ignore_ascii_case(FREE_PRICE)
}
