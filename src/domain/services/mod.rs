pub mod auth_service;
pub mod capacity;
pub mod placement;
pub mod popularity;
pub mod rating;
pub mod registration_service;
pub mod status;
