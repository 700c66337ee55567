use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), name }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Location {
    pub id: String,
    pub city: String,
}

impl Location {
    pub fn new(city: String) -> Self {
        Self { id: Uuid::new_v4().to_string(), city }
    }
}
