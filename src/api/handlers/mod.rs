pub mod auth;
pub mod catalog;
pub mod event;
pub mod health;
pub mod rating;
pub mod registration;
pub mod user;
