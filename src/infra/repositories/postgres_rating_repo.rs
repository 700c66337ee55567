use crate::domain::{models::rating::Rating, ports::RatingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRatingRepo {
    pool: PgPool,
}

impl PostgresRatingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepo {
    async fn create(&self, rating: &Rating) -> Result<Rating, AppError> {
        sqlx::query_as::<_, Rating>(
            "INSERT INTO ratings (id, user_id, event_id, rating, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING *"
        )
            .bind(&rating.id)
            .bind(&rating.user_id)
            .bind(&rating.event_id)
            .bind(rating.rating)
            .bind(rating.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Rating>, AppError> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Rating>, AppError> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Rating>, AppError> {
        sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE event_id = $1 ORDER BY created_at ASC")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, rating: &Rating) -> Result<Rating, AppError> {
        sqlx::query_as::<_, Rating>("UPDATE ratings SET rating = $1 WHERE id = $2 RETURNING *")
            .bind(rating.rating)
            .bind(&rating.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Rating not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rating not found".into()));
        }
        Ok(())
    }
}
