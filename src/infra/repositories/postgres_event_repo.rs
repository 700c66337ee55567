use crate::domain::{
    models::{event::{CapacityChange, Event}, session::EventSession},
    ports::EventRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn write_sessions(tx: &mut Transaction<'static, Postgres>, event_id: &str, sessions: &[EventSession]) -> Result<(), AppError> {
    sqlx::query("DELETE FROM event_sessions WHERE event_id = $1")
        .bind(event_id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

    for session in sessions {
        sqlx::query(
            r#"INSERT INTO event_sessions (id, event_id, date, time, speaker, location, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#
        )
            .bind(&session.id)
            .bind(event_id)
            .bind(&session.date)
            .bind(&session.time)
            .bind(&session.speaker)
            .bind(&session.location)
            .bind(session.created_at)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;
    }
    Ok(())
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event, sessions: &[EventSession]) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, name, description, date_start, date_end, time,
                location_id, location, address, capacity, remaining_capacity,
                photo, price, category_id, benefits, mode, link, status, popularity_score, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.date_start)
            .bind(&event.date_end)
            .bind(&event.time)
            .bind(&event.location_id)
            .bind(&event.location)
            .bind(&event.address)
            .bind(event.capacity)
            .bind(event.remaining_capacity)
            .bind(&event.photo)
            .bind(&event.price)
            .bind(&event.category_id)
            .bind(&event.benefits)
            .bind(&event.mode)
            .bind(&event.link)
            .bind(&event.status)
            .bind(event.popularity_score)
            .bind(event.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        write_sessions(&mut tx, &created.id, sessions).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date_start ASC, created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_popularity(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY popularity_score DESC, created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_not_registered_by(&self, user_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"SELECT * FROM events
               WHERE id NOT IN (SELECT event_id FROM registrations WHERE user_id = $1)
               ORDER BY date_start ASC, created_at ASC"#,
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event, capacity: Option<CapacityChange>, sessions: Option<&[EventSession]>) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let mut updated = sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                name=$1, description=$2, date_start=$3, date_end=$4, time=$5,
                location_id=$6, location=$7, address=$8,
                photo=$9, price=$10, category_id=$11, benefits=$12, mode=$13, link=$14, status=$15
               WHERE id=$16 RETURNING *"#
        )
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.date_start)
            .bind(&event.date_end)
            .bind(&event.time)
            .bind(&event.location_id)
            .bind(&event.location)
            .bind(&event.address)
            .bind(&event.photo)
            .bind(&event.price)
            .bind(&event.category_id)
            .bind(&event.benefits)
            .bind(&event.mode)
            .bind(&event.link)
            .bind(&event.status)
            .bind(&event.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

        // Evaluated against the stored counts, so seats claimed since the
        // caller read the event stay claimed.
        if let Some(change) = capacity {
            updated = sqlx::query_as::<_, Event>(
                r#"UPDATE events SET
                    remaining_capacity = CASE
                        WHEN $1::INTEGER IS NOT NULL THEN $1
                        WHEN $2::INTEGER < capacity THEN $2
                        ELSE remaining_capacity
                    END,
                    capacity = COALESCE($2, capacity)
                   WHERE id = $3 RETURNING *"#
            )
                .bind(change.remaining)
                .bind(change.total)
                .bind(&updated.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        if let Some(sessions) = sessions {
            write_sessions(&mut tx, &updated.id, sessions).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn update_popularity(&self, id: &str, score: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE events SET popularity_score = $1 WHERE id = $2")
            .bind(score)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
