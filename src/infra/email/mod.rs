pub mod email_notifier;
pub mod http_email_service;
