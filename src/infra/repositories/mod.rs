pub mod sqlite_user_repo;
pub mod sqlite_event_repo;
pub mod sqlite_session_repo;
pub mod sqlite_registration_repo;
pub mod sqlite_rating_repo;
pub mod sqlite_catalog_repo;

pub mod postgres_user_repo;
pub mod postgres_event_repo;
pub mod postgres_session_repo;
pub mod postgres_registration_repo;
pub mod postgres_rating_repo;
pub mod postgres_catalog_repo;
