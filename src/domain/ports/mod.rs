use crate::domain::models::{
    user::User, event::{CapacityChange, Event}, session::EventSession, registration::{Registration, RegistrationNotice},
    rating::Rating, catalog::{Category, Location},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts the event and its sessions in one transaction.
    async fn create(&self, event: &Event, sessions: &[EventSession]) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn list_by_popularity(&self) -> Result<Vec<Event>, AppError>;
    async fn list_not_registered_by(&self, user_id: &str) -> Result<Vec<Event>, AppError>;
    /// Writes the descriptive fields of `event`. Seat counts change only through
    /// `capacity`; `sessions`, when given, replace the stored ones. One transaction.
    async fn update(&self, event: &Event, capacity: Option<CapacityChange>, sessions: Option<&[EventSession]>) -> Result<Event, AppError>;
    async fn update_popularity(&self, id: &str, score: f64) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<EventSession>, AppError>;
}

/// An open storage transaction holding a freshly inserted registration and the
/// matching capacity decrement. Dropping it without `commit` rolls both back.
#[async_trait]
pub trait PendingRegistration: Send {
    fn registration(&self) -> &Registration;
    async fn commit(self: Box<Self>) -> Result<Registration, AppError>;
    async fn rollback(self: Box<Self>) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Claims one seat (`remaining_capacity > 0` guard) and inserts the row.
    /// Fails with `AppError::CapacityExhausted` when no seat is left.
    async fn reserve(&self, registration: &Registration) -> Result<Box<dyn PendingRegistration>, AppError>;
    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Registration>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn create(&self, rating: &Rating) -> Result<Rating, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Rating>, AppError>;
    async fn find_by_user_and_event(&self, user_id: &str, event_id: &str) -> Result<Option<Rating>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Rating>, AppError>;
    async fn update(&self, rating: &Rating) -> Result<Rating, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &Category) -> Result<Category, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, AppError>;
    async fn list(&self) -> Result<Vec<Category>, AppError>;
    async fn update(&self, category: &Category) -> Result<Category, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, location: &Location) -> Result<Location, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Location>, AppError>;
    async fn list(&self) -> Result<Vec<Location>, AppError>;
    async fn update(&self, location: &Location) -> Result<Location, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notice: &RegistrationNotice) -> Result<(), AppError>;
    async fn send_payment_confirmation(&self, notice: &RegistrationNotice) -> Result<(), AppError>;
}
