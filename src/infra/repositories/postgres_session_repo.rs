use crate::domain::{models::session::EventSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepo {
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventSession>, AppError> {
        sqlx::query_as::<_, EventSession>(
            "SELECT * FROM event_sessions WHERE event_id = $1 ORDER BY date ASC, time ASC"
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
