use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct SessionRequest {
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date_start: String,
    pub date_end: Option<String>,
    #[serde(default)]
    pub time: String,
    pub location_id: Option<String>,
    #[serde(default)]
    pub address: String,
    pub capacity: i64,
    #[serde(default)]
    pub photo: String,
    pub price: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub benefits: String,
    pub mode: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub sessions: Vec<SessionRequest>,
}

/// Absent fields keep their stored value.
#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub time: Option<String>,
    pub location_id: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i64>,
    pub remaining_capacity: Option<i64>,
    pub photo: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
    pub benefits: Option<String>,
    pub mode: Option<String>,
    pub link: Option<String>,
    pub sessions: Option<Vec<SessionRequest>>,
}

#[derive(Deserialize)]
pub struct RegisterEventRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub job: String,
    pub payment_method: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRatingRequest {
    pub event_id: String,
    pub rating: i32,
}

#[derive(Deserialize)]
pub struct UpdateRatingRequest {
    pub rating: i32,
}

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct LocationRequest {
    pub city: String,
}
