use crate::domain::{
    models::registration::Registration,
    ports::{PendingRegistration, RegistrationRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub struct SqlitePendingRegistration {
    tx: Transaction<'static, Sqlite>,
    registration: Registration,
}

#[async_trait]
impl PendingRegistration for SqlitePendingRegistration {
    fn registration(&self) -> &Registration {
        &self.registration
    }

    async fn commit(self: Box<Self>) -> Result<Registration, AppError> {
        let this = *self;
        this.tx.commit().await.map_err(AppError::Database)?;
        Ok(this.registration)
    }

    async fn rollback(self: Box<Self>) -> Result<(), AppError> {
        self.tx.rollback().await.map_err(AppError::Database)
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn reserve(&self, registration: &Registration) -> Result<Box<dyn PendingRegistration>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let claimed = sqlx::query(
            "UPDATE events SET remaining_capacity = remaining_capacity - 1 WHERE id = ? AND remaining_capacity > 0"
        )
            .bind(&registration.event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if claimed.rows_affected() == 0 {
            debug!(event_id = %registration.event_id, "No seat left to claim");
            return Err(AppError::CapacityExhausted);
        }

        let row = sqlx::query_as::<_, Registration>(
            r#"INSERT INTO registrations (
                id, user_id, event_id, username, name, email, phone, job,
                payment_method, payment_status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&registration.id)
            .bind(&registration.user_id)
            .bind(&registration.event_id)
            .bind(&registration.username)
            .bind(&registration.name)
            .bind(&registration.email)
            .bind(&registration.phone)
            .bind(&registration.job)
            .bind(&registration.payment_method)
            .bind(&registration.payment_status)
            .bind(registration.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        Ok(Box::new(SqlitePendingRegistration { tx, registration: row }))
    }

    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = ? AND event_id = ?"
        )
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = ? ORDER BY created_at ASC"
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE user_id = ? ORDER BY created_at DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
