pub mod auth;
pub mod catalog;
pub mod event;
pub mod rating;
pub mod registration;
pub mod session;
pub mod user;
